//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! Grayscale presets, saturation and the partial grayscale stage all weight
//! channels the same way, so the coefficients live here.

/// ITU-R BT.601 coefficient for the red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for the green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for the blue channel.
pub const LUMA_B: f32 = 0.114;

/// Calculate luma from channel values on the 0-255 scale.
///
/// Input channels are not required to be in range; intermediate pipeline
/// values may exceed 255 before the final clamp.
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}
