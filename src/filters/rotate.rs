//! Rotation with automatic canvas expansion
//!
//! Angles are in degrees, counter-clockwise. The output canvas is the
//! bounding box of the rotated source, so no pixel of the original is
//! cropped. Quarter turns go through the lossless `image` routines; every
//! other angle is resampled with `imageproc`.

use image::imageops;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use tracing::debug;

/// Angles closer than this to a quarter turn are treated as exact
const QUARTER_TURN_EPSILON: f32 = 1e-3;

/// Rotate `image` counter-clockwise by `degrees`, growing the canvas to fit
pub fn rotate_expand(image: &DynamicImage, degrees: f32) -> DynamicImage {
    let normalised = degrees.rem_euclid(360.0);

    // Fast paths: exact multiples of 90 keep every pixel intact.
    // `image` rotates clockwise, so a 90 degree CCW turn is `rotate270`.
    if near(normalised, 0.0) || near(normalised, 360.0) {
        return image.clone();
    }
    if near(normalised, 90.0) {
        return image.rotate270();
    }
    if near(normalised, 180.0) {
        return image.rotate180();
    }
    if near(normalised, 270.0) {
        return image.rotate90();
    }

    let has_alpha = image.color().has_alpha();
    let fill = if has_alpha {
        Rgba([0, 0, 0, 0])
    } else {
        Rgba([0, 0, 0, 255])
    };

    let source = image.to_rgba8();
    let (width, height) = expanded_size(source.width(), source.height(), normalised);

    // The bounding box can be narrower than the source on one axis (a wide
    // image turned near 90 degrees), so the working canvas covers both.
    let canvas_w = width.max(source.width());
    let canvas_h = height.max(source.height());

    // Centre the source on the canvas, then spin the whole canvas.
    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, fill);
    let offset_x = (canvas_w - source.width()) / 2;
    let offset_y = (canvas_h - source.height()) / 2;
    imageops::replace(&mut canvas, &source, i64::from(offset_x), i64::from(offset_y));

    // imageproc turns clockwise for positive angles
    let spun = rotate_about_center(
        &canvas,
        -normalised.to_radians(),
        Interpolation::Bilinear,
        fill,
    );

    // Cut the bounding box out of the middle of the working canvas
    let rotated = imageops::crop_imm(
        &spun,
        (canvas_w - width) / 2,
        (canvas_h - height) / 2,
        width,
        height,
    )
    .to_image();

    debug!(
        from_w = image.width(),
        from_h = image.height(),
        to_w = width,
        to_h = height,
        "Arbitrary-angle rotation applied"
    );

    let rotated = DynamicImage::ImageRgba8(rotated);
    if has_alpha {
        rotated
    } else {
        DynamicImage::ImageRgb8(rotated.into_rgb8())
    }
}

/// Size of the axis-aligned box holding a `width` x `height` rectangle
/// rotated by `degrees`
///
/// For a square source the box is never smaller than the source. A
/// non-square source can end up narrower on one axis. Neither side is ever
/// zero.
pub fn expanded_size(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let radians = f64::from(degrees).to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    let (w, h) = (f64::from(width), f64::from(height));

    // Shave off float noise so a quarter turn doesn't gain a column
    let fit = |extent: f64| -> u32 { ((extent - 1e-6).ceil().max(1.0)) as u32 };

    (fit(w * cos + h * sin), fit(w * sin + h * cos))
}

fn near(value: f32, target: f32) -> bool {
    (value - target).abs() < QUARTER_TURN_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{gradient_rgb, gradient_rgba, white_rgb};
    use image::GenericImageView;

    #[test]
    fn test_zero_and_full_turns_are_identity() {
        let source = gradient_rgb(13, 7);
        for degrees in [0.0, 360.0, -360.0, 720.0] {
            assert_eq!(rotate_expand(&source, degrees), source);
        }
    }

    #[test]
    fn test_half_turn_keeps_dimensions() {
        let source = gradient_rgb(13, 7);
        let rotated = rotate_expand(&source, 180.0);
        assert_eq!(rotated.dimensions(), (13, 7));
        assert_eq!(rotate_expand(&rotated, 180.0), source);
    }

    #[test]
    fn test_quarter_turn_is_counter_clockwise() {
        let source = gradient_rgb(4, 2);
        let rotated = rotate_expand(&source, 90.0);
        assert_eq!(rotated.dimensions(), (2, 4));
        // The top-right corner ends up top-left after a CCW quarter turn
        assert_eq!(rotated.get_pixel(0, 0), source.get_pixel(3, 0));
    }

    #[test]
    fn test_negative_quarter_turn_is_clockwise() {
        let source = gradient_rgb(4, 2);
        assert_eq!(rotate_expand(&source, -90.0), source.rotate90());
    }

    #[test]
    fn test_arbitrary_angle_grows_canvas() {
        let source = gradient_rgb(50, 50);
        for degrees in [1.0, 30.0, 45.0, 100.0, 225.5, -17.0] {
            let (w, h) = rotate_expand(&source, degrees).dimensions();
            assert!(w >= 50 && h >= 50, "{degrees}: {w}x{h}");
        }
    }

    #[test]
    fn test_expanded_size_matches_bounding_box() {
        assert_eq!(expanded_size(100, 50, 0.0), (100, 50));
        assert_eq!(expanded_size(100, 50, 90.0), (50, 100));
        // 45 degrees on a 10x10 square: 10 * sqrt(2) = 14.14
        assert_eq!(expanded_size(10, 10, 45.0), (15, 15));
    }

    #[test]
    fn test_opaque_images_stay_opaque() {
        let rotated = rotate_expand(&white_rgb(20, 10), 30.0);
        assert_eq!(rotated.color(), image::ColorType::Rgb8);
        // Corners are outside the rotated source and filled with black
        assert_eq!(rotated.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_alpha_images_get_transparent_corners() {
        let rotated = rotate_expand(&gradient_rgba(20, 10), 30.0);
        assert_eq!(rotated.color(), image::ColorType::Rgba8);
        assert_eq!(rotated.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_non_square_output_matches_bounding_box() {
        // The bounding box is narrower than the source on one axis here
        for (w, h, degrees) in [(60, 40, 80.0), (100, 10, 45.0), (100, 10, 80.0), (60, 40, 100.0)] {
            let rotated = rotate_expand(&white_rgb(w, h), degrees);
            let (out_w, out_h) = rotated.dimensions();
            assert_eq!((out_w, out_h), expanded_size(w, h, degrees), "{w}x{h} at {degrees}");

            let centre = rotated.get_pixel(out_w / 2, out_h / 2);
            assert!(
                centre[0] > 200 && centre[1] > 200 && centre[2] > 200,
                "{w}x{h} at {degrees}: centre {centre:?}"
            );
        }
    }

    #[test]
    fn test_non_square_rotation_keeps_alpha_content() {
        let rotated = rotate_expand(&gradient_rgba(60, 40), 80.0);
        let (w, h) = rotated.dimensions();
        assert_eq!((w, h), expanded_size(60, 40, 80.0));
        assert!(rotated.get_pixel(w / 2, h / 2)[3] > 0);
    }

    #[test]
    fn test_centre_pixel_survives() {
        let rotated = rotate_expand(&white_rgb(21, 21), 45.0);
        let (w, h) = rotated.dimensions();
        assert_eq!(rotated.get_pixel(w / 2, h / 2), Rgba([255, 255, 255, 255]));
    }
}
