//! Error types for the editor
//!
//! `EditorError` covers everything that can go wrong while loading or
//! saving the current image. `PromptError` covers bad input typed into the
//! resize / rotate parameter prompts.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the image document (load / save)
#[derive(Debug, Error)]
pub enum EditorError {
    /// The source file could not be opened or decoded
    ///
    /// Raised for missing files, unreadable files and formats the
    /// `image` crate has no decoder for.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The current image could not be encoded or written to disk
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The target extension is not one of the formats we save to
    #[error("unsupported output format for {} (expected .jpg, .jpeg or .png)", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// An operation needed an image but none has been loaded yet
    #[error("no image loaded")]
    NoImage,
}

/// Invalid input in one of the parameter prompts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("a value is required")]
    Empty,

    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),

    #[error("the value must be greater than zero")]
    NotPositive,

    #[error("'{0}' is too large")]
    TooLarge(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("the angle must be a finite number")]
    NotFinite,
}
