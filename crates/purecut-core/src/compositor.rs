//! Preview compositor.
//!
//! Derives the on-screen preview from the canonical source buffer. The
//! source is never mutated; every call allocates a fresh output.
//!
//! ## Stage Order
//! 1. Color: filter preset, then brightness/contrast/saturation, then the
//!    partial grayscale and sepia amounts
//! 2. Blur: separable Gaussian on premultiplied alpha
//! 3. Geometry: mirror and rotate about the center
//!
//! Stages whose parameters are at identity are skipped, so identity
//! parameters with no preset return a byte-identical copy of the source.

use tracing::{debug, instrument};

use crate::adjustments::{adjust_pixel, to_channel};
use crate::blur::gaussian_blur;
use crate::buffer::{PixelBuffer, CHANNELS};
use crate::filters::{apply_grayscale_amount, apply_preset, apply_sepia_amount};
use crate::transform::rotate_arbitrary;
use crate::{AdjustmentParameters, FilterType};

/// A single step of the preview pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Color,
    Blur,
    Geometry,
}

impl Stage {
    /// The pipeline, in execution order.
    pub const PIPELINE: [Stage; 3] = [Stage::Color, Stage::Blur, Stage::Geometry];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Color => "color",
            Stage::Blur => "blur",
            Stage::Geometry => "geometry",
        }
    }

    /// Whether this stage would change the image for the given settings.
    pub fn is_active(self, params: &AdjustmentParameters, filter: FilterType) -> bool {
        match self {
            Stage::Color => filter != FilterType::None || params.affects_color(),
            Stage::Blur => params.blur > 0.0,
            Stage::Geometry => params.affects_geometry(),
        }
    }

    fn apply(
        self,
        buffer: PixelBuffer,
        params: &AdjustmentParameters,
        filter: FilterType,
    ) -> PixelBuffer {
        match self {
            Stage::Color => color_stage(buffer, params, filter),
            Stage::Blur => gaussian_blur(&buffer, params.blur),
            Stage::Geometry => rotate_arbitrary(
                &buffer,
                params.normalized_rotation() as f64,
                params.mirror_horizontal,
            ),
        }
    }
}

/// Render the preview for `source` under the given parameters and preset.
///
/// The output always has the same dimensions as the source.
#[instrument(skip_all, fields(width = source.width, height = source.height, filter = %filter))]
pub fn render(
    source: &PixelBuffer,
    params: &AdjustmentParameters,
    filter: FilterType,
) -> PixelBuffer {
    let mut output = source.clone();

    for stage in Stage::PIPELINE {
        if !stage.is_active(params, filter) {
            continue;
        }
        debug!(stage = stage.name(), "applying stage");
        output = stage.apply(output, params, filter);
    }

    output
}

/// Per-pixel color work. Channels are only rounded once, at the end.
fn color_stage(
    mut buffer: PixelBuffer,
    params: &AdjustmentParameters,
    filter: FilterType,
) -> PixelBuffer {
    for chunk in buffer.pixels.chunks_exact_mut(CHANNELS) {
        let mut rgb = [chunk[0] as f32, chunk[1] as f32, chunk[2] as f32];
        rgb = apply_preset(rgb, filter);
        rgb = adjust_pixel(rgb, params);
        rgb = apply_grayscale_amount(rgb, params.grayscale_percent);
        rgb = apply_sepia_amount(rgb, params.sepia_percent);

        chunk[0] = to_channel(rgb[0]);
        chunk[1] = to_channel(rgb[1]);
        chunk[2] = to_channel(rgb[2]);
    }
    buffer
}
