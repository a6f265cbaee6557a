//! Stylized filter presets and partial tone stages.
//!
//! Presets establish a base look and run before the color adjustments. The
//! partial grayscale and sepia stages run after adjustments and blend each
//! pixel toward its fully filtered value by a percentage.
//!
//! Every function here clamps its output to 0-255 so the next stage always
//! reads well-defined channel values.

use crate::adjustments::clamp_channel;
use crate::luminance::luma;
use crate::FilterType;

/// Apply a preset to a single pixel's RGB channels.
pub fn apply_preset(rgb: [f32; 3], filter: FilterType) -> [f32; 3] {
    let [r, g, b] = rgb;
    let (r, g, b) = match filter {
        FilterType::None => return rgb,
        FilterType::Grayscale => {
            let v = luma(r, g, b);
            (v, v, v)
        }
        FilterType::Sepia => sepia(r, g, b),
        FilterType::Invert => (255.0 - r, 255.0 - g, 255.0 - b),
        // Warm tint, no black-point anchoring
        FilterType::Vintage => (r * 1.2, g * 1.1, b * 0.9),
        // High contrast about 128 with a red/blue split
        FilterType::Kodachrome => (
            (r - 128.0) * 1.5 + 128.0 + 20.0,
            (g - 128.0) * 1.5 + 128.0,
            (b - 128.0) * 1.5 + 128.0 - 20.0,
        ),
        // Two-strip look: red kept, green and blue merged into cyan
        FilterType::Technicolor => {
            let cyan = (g + b) / 2.0;
            (r, cyan, cyan)
        }
    };
    [clamp_channel(r), clamp_channel(g), clamp_channel(b)]
}

/// Blend toward luma by `percent` (0-100).
pub fn apply_grayscale_amount(rgb: [f32; 3], percent: f32) -> [f32; 3] {
    let amount = (percent / 100.0).clamp(0.0, 1.0);
    if amount == 0.0 {
        return rgb;
    }
    let [r, g, b] = rgb;
    let v = luma(r, g, b);
    [
        clamp_channel(lerp(r, v, amount)),
        clamp_channel(lerp(g, v, amount)),
        clamp_channel(lerp(b, v, amount)),
    ]
}

/// Blend toward the sepia matrix result by `percent` (0-100).
pub fn apply_sepia_amount(rgb: [f32; 3], percent: f32) -> [f32; 3] {
    let amount = (percent / 100.0).clamp(0.0, 1.0);
    if amount == 0.0 {
        return rgb;
    }
    let [r, g, b] = rgb;
    let (sr, sg, sb) = sepia(r, g, b);
    [
        clamp_channel(lerp(r, sr, amount)),
        clamp_channel(lerp(g, sg, amount)),
        clamp_channel(lerp(b, sb, amount)),
    ]
}

#[inline]
fn sepia(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    (
        0.393 * r + 0.769 * g + 0.189 * b,
        0.349 * r + 0.686 * g + 0.168 * b,
        0.272 * r + 0.534 * g + 0.131 * b,
    )
}

#[inline]
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
