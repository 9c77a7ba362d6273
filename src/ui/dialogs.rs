//! Native dialogs
//!
//! The editor talks to file pickers and message boxes through the `Dialogs`
//! trait so the update logic can run without a desktop session. The real
//! implementation is a thin wrapper around `rfd`.

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;

use crate::config::{EditorConfig, FileFilter};

/// Everything the shell needs from the desktop
pub trait Dialogs {
    /// Ask for an image to open; `None` when the user cancels
    fn pick_image(&self) -> Option<PathBuf>;
    /// Ask where to save; `None` when the user cancels
    fn pick_save_path(&self) -> Option<PathBuf>;
    /// Something was requested that can't be done right now
    fn warn(&self, title: &str, message: &str);
    /// An operation finished successfully
    fn inform(&self, title: &str, message: &str);
    /// An operation failed
    fn error(&self, title: &str, message: &str);
}

/// `rfd`-backed dialogs
#[derive(Debug, Clone)]
pub struct NativeDialogs {
    open_filter: FileFilter,
    save_filters: &'static [FileFilter],
    default_extension: &'static str,
}

impl NativeDialogs {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            open_filter: config.open_filter,
            save_filters: config.save_filters,
            default_extension: config.default_extension,
        }
    }

    fn message(&self, level: MessageLevel, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

impl Dialogs for NativeDialogs {
    fn pick_image(&self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Load Image")
            .add_filter(self.open_filter.name, self.open_filter.extensions)
            .pick_file()
    }

    fn pick_save_path(&self) -> Option<PathBuf> {
        let dialog = self
            .save_filters
            .iter()
            .fold(FileDialog::new().set_title("Save Image"), |dialog, filter| {
                dialog.add_filter(filter.name, filter.extensions)
            })
            .set_file_name(format!("untitled.{}", self.default_extension));
        dialog.save_file()
    }

    fn warn(&self, title: &str, message: &str) {
        self.message(MessageLevel::Warning, title, message);
    }

    fn inform(&self, title: &str, message: &str) {
        self.message(MessageLevel::Info, title, message);
    }

    fn error(&self, title: &str, message: &str) {
        self.message(MessageLevel::Error, title, message);
    }
}
