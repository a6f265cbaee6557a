//! Free rotation about the buffer center, with optional mirroring.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source position lands on it and sample there. The
//! output keeps the input dimensions, so corners rotated outside the frame
//! are cropped and uncovered areas become transparent.
//!
//! The forward transform mirrors horizontally (if requested) and then
//! rotates clockwise by θ. Its inverse, for pixel centers relative to the
//! buffer center `(cx, cy)`:
//! ```text
//! rx =  dx * cos(θ) + dy * sin(θ)
//! ry = -dx * sin(θ) + dy * cos(θ)
//! src_x = (mirror ? -rx : rx) + cx
//! src_y = ry + cy
//! ```

use crate::buffer::{PixelBuffer, CHANNELS};

/// Interpolation filter for free rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationFilter {
    /// Nearest neighbor - exact on quarter turns, used by the compositor.
    #[default]
    Nearest,
    /// Alpha-aware bilinear interpolation - smoother edges at odd angles.
    Bilinear,
}

/// Rotate about the center using nearest-neighbor sampling.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise)
/// * `mirror` - Mirror horizontally before rotating
pub fn rotate_arbitrary(image: &PixelBuffer, angle_degrees: f64, mirror: bool) -> PixelBuffer {
    rotate_arbitrary_with(image, angle_degrees, mirror, InterpolationFilter::Nearest)
}

/// Rotate about the center with the given interpolation filter.
///
/// Samples that fall outside the source are fully transparent.
pub fn rotate_arbitrary_with(
    image: &PixelBuffer,
    angle_degrees: f64,
    mirror: bool,
    filter: InterpolationFilter,
) -> PixelBuffer {
    let (sin, cos) = sin_cos_degrees(angle_degrees);

    // Fast path: nothing to do
    if !mirror && sin == 0.0 && cos == 1.0 {
        return image.clone();
    }

    let (w, h) = (image.width, image.height);
    let cx = w as f64 / 2.0;
    let cy = h as f64 / 2.0;

    let mut output = vec![0u8; image.pixels.len()];

    for dst_y in 0..h {
        for dst_x in 0..w {
            // Pixel center relative to the buffer center
            let dx = dst_x as f64 + 0.5 - cx;
            let dy = dst_y as f64 + 0.5 - cy;

            let rx = dx * cos + dy * sin;
            let ry = -dx * sin + dy * cos;
            let src_x = if mirror { -rx } else { rx } + cx;
            let src_y = ry + cy;

            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
            };

            let dst_idx = (dst_y as usize * w as usize + dst_x as usize) * CHANNELS;
            output[dst_idx..dst_idx + CHANNELS].copy_from_slice(&pixel);
        }
    }

    PixelBuffer::new(w, h, output)
}

/// Sine and cosine of an angle in degrees, exact on multiples of 90.
fn sin_cos_degrees(angle_degrees: f64) -> (f64, f64) {
    let normalized = angle_degrees.rem_euclid(360.0);
    if normalized.fract() == 0.0 {
        match normalized as u32 {
            0 => return (0.0, 1.0),
            90 => return (1.0, 0.0),
            180 => return (0.0, -1.0),
            270 => return (-1.0, 0.0),
            _ => {}
        }
    }
    normalized.to_radians().sin_cos()
}

/// Sample the pixel whose area contains `(x, y)` (continuous coordinates).
#[inline]
fn sample_nearest(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let px = x.floor();
    let py = y.floor();
    if px < 0.0 || py < 0.0 || px >= image.width as f64 || py >= image.height as f64 {
        return [0, 0, 0, 0];
    }
    image.pixel(px as u32, py as u32).unwrap_or([0, 0, 0, 0])
}

/// Get a pixel as premultiplied [f64; 4], transparent when out of bounds.
#[inline]
fn get_premultiplied(image: &PixelBuffer, px: i64, py: i64) -> [f64; 4] {
    if !image.in_bounds(px, py) {
        return [0.0; 4];
    }
    let i = image.index(px as u32, py as u32);
    let a = image.pixels[i + 3] as f64;
    let scale = a / 255.0;
    [
        image.pixels[i] as f64 * scale,
        image.pixels[i + 1] as f64 * scale,
        image.pixels[i + 2] as f64 * scale,
        a,
    ]
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixel centers and weights
/// their contribution based on distance. Neighbors outside the source count
/// as transparent, which softens the rotated edge instead of clipping it.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    // Shift from continuous coordinates to pixel-center space
    let x = x - 0.5;
    let y = y - 0.5;

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_premultiplied(image, x0, y0);
    let p10 = get_premultiplied(image, x0 + 1, y0);
    let p01 = get_premultiplied(image, x0, y0 + 1);
    let p11 = get_premultiplied(image, x0 + 1, y0 + 1);

    let mut acc = [0.0f64; 4];
    for (i, value) in acc.iter_mut().enumerate() {
        *value = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    let alpha = acc[3].clamp(0.0, 255.0).round();
    if alpha == 0.0 {
        return [0, 0, 0, 0];
    }

    let scale = 255.0 / acc[3];
    [
        (acc[0] * scale).clamp(0.0, 255.0).round() as u8,
        (acc[1] * scale).clamp(0.0, 255.0).round() as u8,
        (acc[2] * scale).clamp(0.0, 255.0).round() as u8,
        alpha as u8,
    ]
}
