//! Axis-aligned transforms.
//!
//! Each output pixel is copied from exactly one source pixel, so these never
//! interpolate and are exactly reversible.

use crate::buffer::{PixelBuffer, CHANNELS};

/// Rotate a quarter turn clockwise.
///
/// The output is `height x width`; output `(x, y)` comes from source
/// `(y, height - 1 - x)`.
pub fn rotate90(image: &PixelBuffer) -> PixelBuffer {
    let (src_w, src_h) = (image.width, image.height);
    let (dst_w, dst_h) = (src_h, src_w);
    let mut output = vec![0u8; image.pixels.len()];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let src_idx = image.index(dst_y, src_h - 1 - dst_x);
            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * CHANNELS;
            output[dst_idx..dst_idx + CHANNELS]
                .copy_from_slice(&image.pixels[src_idx..src_idx + CHANNELS]);
        }
    }

    PixelBuffer::new(dst_w, dst_h, output)
}

/// Mirror left to right. Output `(x, y)` comes from `(width - 1 - x, y)`.
pub fn flip_horizontal(image: &PixelBuffer) -> PixelBuffer {
    let row_len = image.width as usize * CHANNELS;
    let mut output = Vec::with_capacity(image.pixels.len());

    if row_len > 0 {
        for row in image.pixels.chunks_exact(row_len) {
            for px in row.chunks_exact(CHANNELS).rev() {
                output.extend_from_slice(px);
            }
        }
    }

    PixelBuffer::new(image.width, image.height, output)
}

/// Mirror top to bottom. Output `(x, y)` comes from `(x, height - 1 - y)`.
pub fn flip_vertical(image: &PixelBuffer) -> PixelBuffer {
    let row_len = image.width as usize * CHANNELS;
    let mut output = Vec::with_capacity(image.pixels.len());

    if row_len > 0 {
        for row in image.pixels.chunks_exact(row_len).rev() {
            output.extend_from_slice(row);
        }
    }

    PixelBuffer::new(image.width, image.height, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
