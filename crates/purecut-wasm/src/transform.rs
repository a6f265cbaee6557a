//! WASM bindings for geometric transforms.
//!
//! Quarter turns and flips are the destructive user actions; free rotation
//! is exposed for hosts that want to preview geometry on its own.

use crate::types::JsPixelBuffer;
use purecut_core::transform::{self, InterpolationFilter};
use wasm_bindgen::prelude::*;

/// Rotate a quarter turn clockwise. Width and height swap.
#[wasm_bindgen]
pub fn rotate90(image: &JsPixelBuffer) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(transform::rotate90(image.buffer()))
}

/// Mirror left to right.
#[wasm_bindgen]
pub fn flip_horizontal(image: &JsPixelBuffer) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(transform::flip_horizontal(image.buffer()))
}

/// Mirror top to bottom.
#[wasm_bindgen]
pub fn flip_vertical(image: &JsPixelBuffer) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(transform::flip_vertical(image.buffer()))
}

/// Rotate about the center, keeping the original dimensions.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise)
/// * `mirror` - Mirror horizontally before rotating
/// * `smooth` - Use bilinear sampling, otherwise nearest neighbor
///
/// Corners rotated outside the frame are cropped; uncovered areas are
/// transparent.
#[wasm_bindgen]
pub fn rotate_arbitrary(
    image: &JsPixelBuffer,
    angle_degrees: f64,
    mirror: bool,
    smooth: bool,
) -> JsPixelBuffer {
    let filter = if smooth {
        InterpolationFilter::Bilinear
    } else {
        InterpolationFilter::Nearest
    };
    let out = transform::rotate_arbitrary_with(image.buffer(), angle_degrees, mirror, filter);
    JsPixelBuffer::from_buffer(out)
}
