//! Color adjustment algorithms
//!
//! Applies brightness, contrast and saturation to RGB channel values on the
//! 0-255 scale. Alpha is never touched.
//!
//! ## Adjustment Order
//! 1. Brightness (signed offset added to each channel)
//! 2. Contrast (offset mapped through the 259 curve, pivot 128)
//! 3. Saturation (scale distance from BT.601 luma)
//!
//! Intermediate values are left unclamped so an early step cannot clip
//! detail that a later step would bring back into range. The clamp happens
//! once, after saturation.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::luminance::luma;
use crate::AdjustmentParameters;

/// Apply brightness, contrast and saturation to every pixel in place.
pub fn apply_adjustments(buffer: &mut PixelBuffer, params: &AdjustmentParameters) {
    if params.brightness == 0.0 && params.contrast == 0.0 && params.saturation == 0.0 {
        return;
    }

    for chunk in buffer.pixels.chunks_exact_mut(CHANNELS) {
        let rgb = [chunk[0] as f32, chunk[1] as f32, chunk[2] as f32];
        let [r, g, b] = adjust_pixel(rgb, params);
        chunk[0] = to_channel(r);
        chunk[1] = to_channel(g);
        chunk[2] = to_channel(b);
    }
}

/// Adjust a single pixel's RGB channels.
///
/// Returns channels clamped to 0-255 but not yet rounded, so callers can
/// chain further per-pixel stages without quantizing in between.
pub fn adjust_pixel(rgb: [f32; 3], params: &AdjustmentParameters) -> [f32; 3] {
    let [mut r, mut g, mut b] = rgb;

    (r, g, b) = apply_brightness(r, g, b, params.brightness);
    (r, g, b) = apply_contrast(r, g, b, params.contrast);
    (r, g, b) = apply_saturation(r, g, b, params.saturation);

    [clamp_channel(r), clamp_channel(g), clamp_channel(b)]
}

/// Contrast multiplier for an offset in -100..=100.
///
/// Formula: `f = 259 * (c + 255) / (255 * (259 - c))`
///
/// Offsets outside the range are clamped to it; the curve has a pole at 259.
#[inline]
pub fn contrast_factor(contrast: f32) -> f32 {
    let c = contrast.clamp(-100.0, 100.0);
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

/// Clamp a channel value to 0-255.
#[inline]
pub fn clamp_channel(v: f32) -> f32 {
    v.clamp(0.0, 255.0)
}

/// Clamp and round a channel value to a byte.
#[inline]
pub fn to_channel(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// Formula: `output = input + brightness`
#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, brightness: f32) -> (f32, f32, f32) {
    if brightness == 0.0 {
        return (r, g, b);
    }
    (r + brightness, g + brightness, b + brightness)
}

/// Formula: `output = f * (input - 128) + 128`
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, contrast: f32) -> (f32, f32, f32) {
    if contrast == 0.0 {
        return (r, g, b);
    }
    let factor = contrast_factor(contrast);
    (
        factor * (r - 128.0) + 128.0,
        factor * (g - 128.0) + 128.0,
        factor * (b - 128.0) + 128.0,
    )
}

/// Saturation ranges from -100 to +100.
/// - Negative = desaturate toward luma (-100 is fully gray)
/// - Positive = push channels away from luma
#[inline]
fn apply_saturation(r: f32, g: f32, b: f32, saturation: f32) -> (f32, f32, f32) {
    if saturation == 0.0 {
        return (r, g, b);
    }
    let gray = luma(r, g, b);
    let factor = 1.0 + (saturation / 100.0);
    (
        gray + (r - gray) * factor,
        gray + (g - gray) * factor,
        gray + (b - gray) * factor,
    )
}
