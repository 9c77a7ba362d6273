//! State management module
//!
//! This module owns the data the editor works on:
//! - The currently open image and where it came from (document.rs)

pub mod document;
