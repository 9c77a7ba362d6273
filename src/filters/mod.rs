//! Image filters
//!
//! The set of filters is closed: every variant of `Filter` is a single
//! delegation to a routine from the `image` crate (or `imageproc` for
//! arbitrary-angle rotation).
//!
//! - `rotate.rs` - rotation with canvas expansion

pub mod rotate;

use image::imageops::FilterType;
use image::DynamicImage;
use std::fmt;
use std::num::NonZeroU32;
use tracing::{debug, info, instrument};

use crate::state::document::ImageDocument;

/// Gaussian sigma used by the blur filter
pub const BLUR_SIGMA: f32 = 2.0;

/// Luminance values below this become black, everything else white
pub const BINARIZE_THRESHOLD: u8 = 128;

/// Resampling filter used by `Filter::Resize`
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// One filter, ready to apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    /// Luminance, expanded back to three channels
    Grayscale,
    /// `255 - value` on every color channel
    Invert,
    /// Gaussian blur with `BLUR_SIGMA`
    Blur,
    /// Black and white split at `BINARIZE_THRESHOLD`
    Binarize,
    /// Resample to exactly `width` x `height` (aspect ratio is not kept)
    Resize { width: NonZeroU32, height: NonZeroU32 },
    /// Counter-clockwise rotation in degrees, canvas grows to fit
    Rotate { degrees: f32 },
}

/// Parameter-free tag for each filter variant
///
/// The UI uses this to label buttons and to decide whether a prompt is
/// needed before the filter can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Grayscale,
    Invert,
    Blur,
    Binarize,
    Resize,
    Rotate,
}

impl FilterKind {
    /// All kinds, in button order
    pub const ALL: [FilterKind; 6] = [
        FilterKind::Grayscale,
        FilterKind::Invert,
        FilterKind::Blur,
        FilterKind::Binarize,
        FilterKind::Resize,
        FilterKind::Rotate,
    ];

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Grayscale => "Grayscale",
            FilterKind::Invert => "Invert",
            FilterKind::Blur => "Blur",
            FilterKind::Binarize => "Binarize",
            FilterKind::Resize => "Resize",
            FilterKind::Rotate => "Rotate",
        }
    }

    /// The filter for kinds that take no parameters
    ///
    /// Returns `None` for `Resize` and `Rotate`, which need user input first.
    pub fn without_parameters(self) -> Option<Filter> {
        match self {
            FilterKind::Grayscale => Some(Filter::Grayscale),
            FilterKind::Invert => Some(Filter::Invert),
            FilterKind::Blur => Some(Filter::Blur),
            FilterKind::Binarize => Some(Filter::Binarize),
            FilterKind::Resize | FilterKind::Rotate => None,
        }
    }
}

impl Filter {
    /// Build a resize filter, rejecting zero dimensions
    pub fn resize(width: u32, height: u32) -> Option<Self> {
        Some(Filter::Resize {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    /// The tag of this filter
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Grayscale => FilterKind::Grayscale,
            Filter::Invert => FilterKind::Invert,
            Filter::Blur => FilterKind::Blur,
            Filter::Binarize => FilterKind::Binarize,
            Filter::Resize { .. } => FilterKind::Resize,
            Filter::Rotate { .. } => FilterKind::Rotate,
        }
    }

    /// Apply this filter to the document's image in place
    ///
    /// An empty document is left alone; this is not an error.
    #[instrument(skip(self, document), fields(filter = %self))]
    pub fn apply(&self, document: &mut ImageDocument) {
        let Some(image) = document.image_mut() else {
            debug!("No image loaded, nothing to filter");
            return;
        };

        let (from_w, from_h) = (image.width(), image.height());
        *image = self.transform(image);

        info!(
            from_w,
            from_h,
            to_w = image.width(),
            to_h = image.height(),
            "🎨 Filter applied"
        );
    }

    /// Produce the filtered copy of `image`
    pub fn transform(&self, image: &DynamicImage) -> DynamicImage {
        match *self {
            Filter::Grayscale => grayscale(image),
            Filter::Invert => {
                let mut inverted = image.clone();
                inverted.invert();
                inverted
            }
            Filter::Blur => image.blur(BLUR_SIGMA),
            Filter::Binarize => binarize(image),
            Filter::Resize { width, height } => {
                image.resize_exact(width.get(), height.get(), RESIZE_FILTER)
            }
            Filter::Rotate { degrees } => rotate::rotate_expand(image, degrees),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Resize { width, height } => write!(f, "Resize {}x{}", width, height),
            Filter::Rotate { degrees } => write!(f, "Rotate {}°", degrees),
            other => f.write_str(other.kind().label()),
        }
    }
}

/// Convert to luminance, then back to three channels
///
/// The round trip keeps the image RGB so display and JPEG encoding see
/// the same channel layout as before the filter.
fn grayscale(image: &DynamicImage) -> DynamicImage {
    let luma = image.grayscale();
    DynamicImage::ImageRgb8(luma.to_rgb8())
}

/// Threshold the luminance at `BINARIZE_THRESHOLD`, expanded back to RGB
fn binarize(image: &DynamicImage) -> DynamicImage {
    let mut luma = image.to_luma8();
    for pixel in luma.pixels_mut() {
        pixel.0[0] = if pixel.0[0] < BINARIZE_THRESHOLD { 0 } else { 255 };
    }
    DynamicImage::ImageLuma8(luma).into_rgb8().into()
}
