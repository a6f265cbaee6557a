//! Separable Gaussian blur.
//!
//! The blur radius is the Gaussian standard deviation in pixels, matching
//! the CSS `blur(<px>)` filter. The kernel extends to `ceil(3 * sigma)` taps
//! on each side, but never past the image, and image edges are clamped.
//!
//! Channels are blurred in premultiplied form so erased (alpha 0) pixels
//! contribute nothing; their stale RGB values never bleed into visible
//! neighbors.

use crate::buffer::{PixelBuffer, CHANNELS};

/// Build a normalized 1D Gaussian kernel for the given sigma.
///
/// The kernel never reaches further than `max_radius` taps from its center.
/// Past the last pixel every tap samples the clamped edge, so the weight a
/// wider kernel would put out there is folded into the two end taps instead.
/// An infinite sigma puts all of it there.
///
/// Returns `[1.0]` for a non-positive or NaN sigma, and for one so small
/// that its variance underflows.
pub fn gaussian_kernel(sigma: f32, max_radius: usize) -> Vec<f32> {
    if sigma.is_nan() || sigma <= 0.0 || sigma * sigma == 0.0 {
        return vec![1.0];
    }

    let reach = (sigma * 3.0).ceil();
    let mut weights = if reach <= max_radius as f32 {
        sampled_weights(sigma, reach as usize, 1.0)
    } else {
        clipped_weights(sigma, max_radius)
    };

    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

fn sampled_weights(sigma: f32, radius: usize, scale: f32) -> Vec<f32> {
    let denom = 2.0 * sigma * sigma;
    let radius = radius as i64;
    (-radius..=radius)
        .map(|i| {
            let x = i as f32;
            scale * (-x * x / denom).exp()
        })
        .collect()
}

fn clipped_weights(sigma: f32, radius: usize) -> Vec<f32> {
    // Density of the continuous Gaussian, so the taps sum to its mass
    // over the kernel span and the rest of 1.0 is the clipped tail.
    let density = 1.0 / ((2.0 * std::f32::consts::PI).sqrt() * sigma);
    let mut weights = sampled_weights(sigma, radius, density);
    let inside: f32 = weights.iter().sum();
    let tail = ((1.0 - inside) / 2.0).max(0.0);

    let last = weights.len() - 1;
    weights[0] += tail;
    weights[last] += tail;
    weights
}

/// Blur a buffer, returning a new buffer of the same dimensions.
///
/// A radius of 0 (or less) returns an unchanged copy. Radii wider than the
/// image cost no more than one that spans it.
pub fn gaussian_blur(buffer: &PixelBuffer, radius: f32) -> PixelBuffer {
    if radius.is_nan() || radius <= 0.0 || buffer.is_empty() {
        return buffer.clone();
    }

    let width = buffer.width as usize;
    let height = buffer.height as usize;
    let row_kernel = gaussian_kernel(radius, width - 1);
    let column_kernel = gaussian_kernel(radius, height - 1);
    if row_kernel.len() == 1 && column_kernel.len() == 1 {
        return buffer.clone();
    }

    let mut src = premultiply(&buffer.pixels);
    let mut tmp = vec![0.0f32; src.len()];

    horizontal_pass(&src, &mut tmp, width, height, &row_kernel);
    vertical_pass(&tmp, &mut src, width, height, &column_kernel);

    PixelBuffer::new(buffer.width, buffer.height, unpremultiply(&src))
}

fn premultiply(pixels: &[u8]) -> Vec<f32> {
    let mut out = Vec::with_capacity(pixels.len());
    for p in pixels.chunks_exact(CHANNELS) {
        let a = p[3] as f32 / 255.0;
        out.push(p[0] as f32 * a);
        out.push(p[1] as f32 * a);
        out.push(p[2] as f32 * a);
        out.push(p[3] as f32);
    }
    out
}

fn unpremultiply(values: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len());
    for p in values.chunks_exact(CHANNELS) {
        let alpha = p[3].clamp(0.0, 255.0).round();
        if alpha == 0.0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let scale = 255.0 / p[3];
        for &c in &p[..3] {
            out.push((c * scale).clamp(0.0, 255.0).round() as u8);
        }
        out.push(alpha as u8);
    }
    out
}

fn horizontal_pass(src: &[f32], dst: &mut [f32], width: usize, height: usize, kernel: &[f32]) {
    let radius = (kernel.len() / 2) as isize;
    let last = width as isize - 1;
    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            let mut acc = [0.0f32; CHANNELS];
            for (k, &weight) in kernel.iter().enumerate() {
                let sx = (x as isize + k as isize - radius).clamp(0, last) as usize;
                let idx = (row + sx) * CHANNELS;
                for c in 0..CHANNELS {
                    acc[c] += weight * src[idx + c];
                }
            }
            let out = (row + x) * CHANNELS;
            dst[out..out + CHANNELS].copy_from_slice(&acc);
        }
    }
}

fn vertical_pass(src: &[f32], dst: &mut [f32], width: usize, height: usize, kernel: &[f32]) {
    let radius = (kernel.len() / 2) as isize;
    let last = height as isize - 1;
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; CHANNELS];
            for (k, &weight) in kernel.iter().enumerate() {
                let sy = (y as isize + k as isize - radius).clamp(0, last) as usize;
                let idx = (sy * width + x) * CHANNELS;
                for c in 0..CHANNELS {
                    acc[c] += weight * src[idx + c];
                }
            }
            let out = (y * width + x) * CHANNELS;
            dst[out..out + CHANNELS].copy_from_slice(&acc);
        }
    }
}
