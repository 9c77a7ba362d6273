//! Editor configuration
//!
//! Every session starts from these defaults. Nothing is read from disk and
//! nothing is written back.

/// A named group of extensions for a native file dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    /// Label shown in the dialog (e.g. "Images")
    pub name: &'static str,
    /// Extensions without the leading dot
    pub extensions: &'static [&'static str],
}

/// Formats the open dialog accepts
pub const OPEN_FILTER: FileFilter = FileFilter {
    name: "Images",
    extensions: &["jpg", "jpeg", "png", "bmp"],
};

/// Formats the save dialog offers, JPEG first
pub const SAVE_FILTERS: &[FileFilter] = &[
    FileFilter {
        name: "JPEG",
        extensions: &["jpg"],
    },
    FileFilter {
        name: "PNG",
        extensions: &["png"],
    },
];

/// JPEG quality used when no explicit value is given
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Upper bounds for a requested resize
///
/// The resize prompt rejects anything larger, so a typo can't ask for an
/// image the process has no memory for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    /// Longest allowed side in pixels
    pub max_side: u32,
    /// Largest allowed width * height
    pub max_pixels: u64,
}

/// 16384 px per side, 100 megapixels in total
pub const DEFAULT_SIZE_LIMITS: SizeLimits = SizeLimits {
    max_side: 16_384,
    max_pixels: 100_000_000,
};

/// All tunables of the application shell
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Window title
    pub title: &'static str,
    /// The preview is scaled down to fit a square of this size
    pub preview_size: u32,
    /// JPEG quality (1-100) for saved images
    pub jpeg_quality: u8,
    /// Filter for the "Load Image" dialog
    pub open_filter: FileFilter,
    /// Filters for the "Save Image" dialog
    pub save_filters: &'static [FileFilter],
    /// Appended when the chosen save path has no extension
    pub default_extension: &'static str,
    /// Largest image the resize prompt accepts
    pub size_limits: SizeLimits,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            title: "Image Editor - Basic Filters",
            preview_size: 400,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            open_filter: OPEN_FILTER,
            save_filters: SAVE_FILTERS,
            default_extension: "jpg",
            size_limits: DEFAULT_SIZE_LIMITS,
        }
    }
}
