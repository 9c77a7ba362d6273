//! User interface module
//!
//! - `dialogs.rs` - native file pickers and message boxes
//! - `preview.rs` - scaled preview of the working image
//! - `prompt.rs` - modal input for resize / rotate parameters

pub mod dialogs;
pub mod preview;
pub mod prompt;
