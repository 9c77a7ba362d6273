//! The image document
//!
//! Holds the single image the editor works on, plus the path it came from.
//! Starts empty; a successful load makes it Loaded and it never goes back.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::error::EditorError;
use crate::filters::Filter;

/// The currently open image
#[derive(Debug, Clone, Default)]
pub struct ImageDocument {
    /// Decoded pixels (None until the first successful load)
    image: Option<DynamicImage>,
    /// Where the image was loaded from
    source_path: Option<PathBuf>,
}

impl ImageDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-decoded image (no source path)
    #[cfg(test)]
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: Some(image),
            source_path: None,
        }
    }

    /// Decode the file at `path` and make it the current image
    ///
    /// The format is sniffed from the file content first, falling back to
    /// the extension. On failure the document is left exactly as it was.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let path = path.as_ref();
        let decode_error = |source| EditorError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let image = ImageReader::open(path)
            .map_err(|e| decode_error(ImageError::IoError(e)))?
            .with_guessed_format()
            .map_err(|e| decode_error(ImageError::IoError(e)))?
            .decode()
            .map_err(decode_error)?;

        info!(
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "📷 Image loaded"
        );

        self.image = Some(image);
        self.source_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Encode the current image to `path` at the default JPEG quality
    #[cfg(test)]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        self.save_with_quality(path, crate::config::DEFAULT_JPEG_QUALITY)
    }

    /// Encode the current image to `path`
    ///
    /// The format follows the extension: `.jpg` / `.jpeg` or `.png`.
    /// JPEG output is flattened to 8-bit RGB since JPEG has no alpha.
    /// The image is fully encoded in memory before the file is touched, so
    /// a failed encode leaves any existing file at `path` intact.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save_with_quality(&self, path: impl AsRef<Path>, quality: u8) -> Result<(), EditorError> {
        let path = path.as_ref();
        let image = self.image.as_ref().ok_or(EditorError::NoImage)?;

        let format = output_format(path).ok_or_else(|| {
            warn!("Refusing to save to unsupported extension");
            EditorError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;

        let encode_error = |source| EditorError::Encode {
            path: path.to_path_buf(),
            source,
        };

        let mut bytes = Vec::new();
        match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
                image
                    .to_rgb8()
                    .write_with_encoder(encoder)
                    .map_err(encode_error)?;
            }
            other => image
                .write_to(&mut Cursor::new(&mut bytes), other)
                .map_err(encode_error)?,
        }

        fs::write(path, &bytes).map_err(|e| encode_error(ImageError::IoError(e)))?;

        info!(
            width = image.width(),
            height = image.height(),
            ?format,
            bytes = bytes.len(),
            "💾 Image saved"
        );
        Ok(())
    }

    /// Apply `filter` to the current image in place (no-op when empty)
    pub fn apply(&mut self, filter: Filter) {
        filter.apply(self);
    }

    /// Check whether an image has been loaded
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// The current image, if any
    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    /// Mutable access for filters
    pub fn image_mut(&mut self) -> Option<&mut DynamicImage> {
        self.image.as_mut()
    }

    /// Path of the last successfully loaded file
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Width and height of the current image
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| (img.width(), img.height()))
    }
}

/// Map a target path to one of the formats we write
///
/// Only JPEG and PNG are offered; anything else (including no extension)
/// is rejected.
pub fn output_format(path: &Path) -> Option<ImageFormat> {
    match ImageFormat::from_path(path).ok()? {
        format @ (ImageFormat::Jpeg | ImageFormat::Png) => Some(format),
        _ => None,
    }
}

/// Append `extension` when `path` has none
pub fn with_default_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{gradient_rgb, gradient_rgba};
    use image::GenericImageView;

    #[test]
    fn test_new_document_is_empty() {
        let document = ImageDocument::new();
        assert!(!document.is_loaded());
        assert!(document.image().is_none());
        assert!(document.source_path().is_none());
        assert_eq!(document.dimensions(), None);
    }

    #[test]
    fn test_png_round_trip_is_pixel_identical() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        gradient_rgb(31, 17).save(&source).unwrap();

        let mut document = ImageDocument::new();
        document.load(&source).unwrap();
        assert_eq!(document.source_path(), Some(source.as_path()));

        let copy = dir.path().join("copy.png");
        document.save(&copy).unwrap();

        let reloaded = image::open(&copy).unwrap();
        assert_eq!(reloaded, *document.image().unwrap());
        assert_eq!(reloaded, gradient_rgb(31, 17));
    }

    #[test]
    fn test_load_sniffs_content_over_extension() {
        let dir = tempfile::tempdir().unwrap();
        let misnamed = dir.path().join("actually_png.jpg");
        gradient_rgb(8, 8)
            .save_with_format(&misnamed, ImageFormat::Png)
            .unwrap();

        let mut document = ImageDocument::new();
        document.load(&misnamed).unwrap();
        assert_eq!(document.dimensions(), Some((8, 8)));
    }

    #[test]
    fn test_failed_load_keeps_empty_document_empty() {
        let mut document = ImageDocument::new();
        let result = document.load("/nonexistent/path.png");
        assert!(matches!(result, Err(EditorError::Decode { .. })));
        assert!(!document.is_loaded());
        assert!(document.source_path().is_none());
    }

    #[test]
    fn test_failed_load_keeps_previous_image() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"definitely not an image").unwrap();

        let mut document = ImageDocument::from_image(gradient_rgb(5, 6));
        let result = document.load(&garbage);
        assert!(matches!(result, Err(EditorError::Decode { .. })));
        assert_eq!(document.dimensions(), Some((5, 6)));
        assert!(document.source_path().is_none());
    }

    #[test]
    fn test_save_without_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.png");
        let result = ImageDocument::new().save(&target);
        assert!(matches!(result, Err(EditorError::NoImage)));
        assert!(!target.exists());
    }

    #[test]
    fn test_save_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let document = ImageDocument::from_image(gradient_rgb(4, 4));
        for name in ["out.gif", "out.bmp", "no_extension"] {
            let target = dir.path().join(name);
            let result = document.save(&target);
            assert!(
                matches!(result, Err(EditorError::UnsupportedFormat { .. })),
                "{name}"
            );
            assert!(!target.exists());
        }
    }

    #[test]
    fn test_save_to_unwritable_path_is_encode_error() {
        let document = ImageDocument::from_image(gradient_rgb(4, 4));
        let result = document.save("/nonexistent/dir/out.png");
        assert!(matches!(result, Err(EditorError::Encode { .. })));
    }

    #[test]
    fn test_jpeg_save_flattens_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.jpeg");
        let document = ImageDocument::from_image(gradient_rgba(16, 12));
        document.save_with_quality(&target, 75).unwrap();

        let reloaded = image::open(&target).unwrap();
        assert_eq!(reloaded.dimensions(), (16, 12));
        assert!(!reloaded.color().has_alpha());
    }

    #[test]
    fn test_failed_encode_leaves_existing_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("existing.jpg");
        std::fs::write(&target, b"previous contents").unwrap();

        // JPEG can't hold a side longer than 65535 px
        let document = ImageDocument::from_image(gradient_rgb(70_000, 1));
        let result = document.save(&target);

        assert!(matches!(result, Err(EditorError::Encode { .. })));
        assert_eq!(std::fs::read(&target).unwrap(), b"previous contents");
    }

    #[test]
    fn test_apply_goes_through_filter() {
        let mut document = ImageDocument::from_image(gradient_rgb(10, 4));
        document.apply(Filter::Rotate { degrees: 90.0 });
        assert_eq!(document.dimensions(), Some((4, 10)));
    }

    #[test]
    fn test_output_format() {
        assert_eq!(output_format(Path::new("a.JPG")), Some(ImageFormat::Jpeg));
        assert_eq!(output_format(Path::new("a.jpeg")), Some(ImageFormat::Jpeg));
        assert_eq!(output_format(Path::new("a.png")), Some(ImageFormat::Png));
        assert_eq!(output_format(Path::new("a.tiff")), None);
        assert_eq!(output_format(Path::new("a")), None);
    }

    #[test]
    fn test_with_default_extension() {
        assert_eq!(
            with_default_extension(PathBuf::from("photo"), "jpg"),
            PathBuf::from("photo.jpg")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("photo.png"), "jpg"),
            PathBuf::from("photo.png")
        );
    }
}
