//! Adjustment parameters and preview rendering bindings.
//!
//! This module provides JavaScript bindings for `AdjustmentParameters` and
//! the compositor, so the host can re-render the preview on every slider
//! change.

use std::str::FromStr;

use crate::types::{js_error, JsPixelBuffer};
use purecut_core::FilterType;
use wasm_bindgen::prelude::*;

/// Adjustment parameters wrapper for JavaScript
#[wasm_bindgen(js_name = AdjustmentParameters)]
#[derive(Clone, Default)]
pub struct JsAdjustmentParameters {
    inner: purecut_core::AdjustmentParameters,
}

#[wasm_bindgen(js_class = AdjustmentParameters)]
impl JsAdjustmentParameters {
    /// Create new parameters with identity values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.brightness = value;
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.saturation = value;
    }

    /// Blur radius in pixels
    #[wasm_bindgen(getter)]
    pub fn blur(&self) -> f32 {
        self.inner.blur
    }

    #[wasm_bindgen(setter)]
    pub fn set_blur(&mut self, value: f32) {
        self.inner.blur = value;
    }

    #[wasm_bindgen(getter)]
    pub fn grayscale_percent(&self) -> f32 {
        self.inner.grayscale_percent
    }

    #[wasm_bindgen(setter)]
    pub fn set_grayscale_percent(&mut self, value: f32) {
        self.inner.grayscale_percent = value;
    }

    #[wasm_bindgen(getter)]
    pub fn sepia_percent(&self) -> f32 {
        self.inner.sepia_percent
    }

    #[wasm_bindgen(setter)]
    pub fn set_sepia_percent(&mut self, value: f32) {
        self.inner.sepia_percent = value;
    }

    /// Rotation in degrees, clockwise
    #[wasm_bindgen(getter)]
    pub fn rotation_degrees(&self) -> i32 {
        self.inner.rotation_degrees
    }

    #[wasm_bindgen(setter)]
    pub fn set_rotation_degrees(&mut self, value: i32) {
        self.inner.rotation_degrees = value;
    }

    #[wasm_bindgen(getter)]
    pub fn mirror_horizontal(&self) -> bool {
        self.inner.mirror_horizontal
    }

    #[wasm_bindgen(setter)]
    pub fn set_mirror_horizontal(&mut self, value: bool) {
        self.inner.mirror_horizontal = value;
    }

    /// Check if all values are at their identity defaults
    pub fn is_identity(&self) -> bool {
        self.inner.is_identity()
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(js_error)
    }

    /// Deserialize from a plain JS object; missing fields take identity values
    pub fn from_json(value: JsValue) -> Result<JsAdjustmentParameters, JsValue> {
        let inner: purecut_core::AdjustmentParameters =
            serde_wasm_bindgen::from_value(value).map_err(js_error)?;
        Ok(Self { inner })
    }
}

impl JsAdjustmentParameters {
    pub(crate) fn from_inner(inner: purecut_core::AdjustmentParameters) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &purecut_core::AdjustmentParameters {
        &self.inner
    }
}

/// Names of every filter preset, in display order.
#[wasm_bindgen]
pub fn filter_names() -> Vec<String> {
    FilterType::ALL
        .iter()
        .map(|f| f.as_str().to_string())
        .collect()
}

/// Render the preview for an image.
///
/// Returns a new image; the source is left untouched.
///
/// # Example (TypeScript)
/// ```typescript
/// const adj = new AdjustmentParameters();
/// adj.brightness = 20;
/// adj.blur = 2;
///
/// const preview = render(source, adj, "SEPIA");
/// ctx.putImageData(new ImageData(preview.image_data(), preview.width), 0, 0);
/// ```
#[wasm_bindgen]
pub fn render(
    image: &JsPixelBuffer,
    adjustments: &JsAdjustmentParameters,
    filter: &str,
) -> Result<JsPixelBuffer, JsValue> {
    let filter = FilterType::from_str(filter).map_err(js_error)?;
    Ok(render_with(image, adjustments, filter))
}

pub(crate) fn render_with(
    image: &JsPixelBuffer,
    adjustments: &JsAdjustmentParameters,
    filter: FilterType,
) -> JsPixelBuffer {
    let out = purecut_core::render(image.buffer(), adjustments.inner(), filter);
    JsPixelBuffer::from_buffer(out)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use purecut_core::PixelBuffer;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_render_parses_filter_names() {
        let image = JsPixelBuffer::from_buffer(PixelBuffer::filled(1, 1, [10, 20, 30, 255]));
        let adj = JsAdjustmentParameters::new();

        let out = render(&image, &adj, "invert").unwrap();
        assert_eq!(out.pixels(), vec![245, 235, 225, 255]);
        assert!(render(&image, &adj, "POSTERIZE").is_err());
    }

    #[wasm_bindgen_test]
    fn test_json_round_trip() {
        let mut adj = JsAdjustmentParameters::new();
        adj.set_sepia_percent(35.0);
        adj.set_rotation_degrees(90);

        let json = adj.to_json().unwrap();
        let restored = JsAdjustmentParameters::from_json(json).unwrap();
        assert_eq!(restored.sepia_percent(), 35.0);
        assert_eq!(restored.rotation_degrees(), 90);
    }
}
