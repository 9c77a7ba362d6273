//! Synthetic images shared by the unit tests

use image::{DynamicImage, ImageBuffer, Rgb, Rgba};

/// An RGB image where every pixel is different enough to catch swaps
pub fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) * 7 % 256) as u8,
        ])
    });
    DynamicImage::ImageRgb8(buffer)
}

/// Same as `gradient_rgb`, with a varying alpha channel
pub fn gradient_rgba(width: u32, height: u32) -> DynamicImage {
    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x * y) % 256) as u8,
            (128 + (x + y) % 128) as u8,
        ])
    });
    DynamicImage::ImageRgba8(buffer)
}

/// A flat white RGB image
pub fn white_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb([255, 255, 255])))
}
