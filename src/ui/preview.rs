//! Preview rendering
//! Scales the working image down to the preview box and hands it to iced

use iced::widget::image::Handle;
use iced::ContentFit;
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

/// How the image widget places the preview inside its fixed box: shrink
/// if needed, never stretch
pub const PREVIEW_FIT: ContentFit = ContentFit::ScaleDown;

/// Largest size that fits `width` x `height` inside a `max` square,
/// keeping the aspect ratio
///
/// Images that already fit are left at their native size. Neither side is
/// ever rounded down to zero.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    let scale = f64::from(max) / f64::from(width.max(height));
    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max);
    (scaled(width), scaled(height))
}

/// Downscaled RGBA copy of `image` for display
pub fn render_preview(image: &DynamicImage, max: u32) -> RgbaImage {
    let (width, height) = fit_within(image.width(), image.height(), max);
    if (width, height) == (image.width(), image.height()) {
        return image.to_rgba8();
    }
    image
        .resize_exact(width, height, FilterType::Lanczos3)
        .into_rgba8()
}

/// iced image handle for the preview surface
pub fn preview_handle(image: &DynamicImage, max: u32) -> Handle {
    let preview = render_preview(image, max);
    let (width, height) = preview.dimensions();
    Handle::from_rgba(width, height, preview.into_raw())
}
