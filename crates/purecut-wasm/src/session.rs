//! Stateful editor binding.
//!
//! Wraps [`EditSession`] so the host keeps a single handle for the whole
//! upload, edit and export flow instead of shuttling buffers across the
//! boundary on every slider move.
//!
//! # Example
//!
//! ```typescript
//! const editor = new EditorSession();
//! editor.load_image(new Uint8Array(await file.arrayBuffer()));
//!
//! const params = editor.adjustments();
//! params.brightness = 20;
//! editor.set_adjustments(params);
//! ctx.putImageData(new ImageData(editor.render_preview().image_data(), w, h), 0, 0);
//!
//! const ticket = editor.begin_background_removal();
//! const result = await removeBackground(new Blob([editor.source_png()]));
//! editor.complete_background_removal(ticket, new Uint8Array(await result.arrayBuffer()));
//! ```

use crate::adjustments::JsAdjustmentParameters;
use crate::gateway::gateway_error;
use crate::types::{js_error, JsPixelBuffer};
use purecut_core::{
    decode_image, EditError, EditSession, FilterType, GatewayError, GatewayTicket, PixelBuffer,
    Tolerance,
};
use wasm_bindgen::prelude::*;

/// One editing session: the canonical image plus its live settings.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct EditorSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl EditorSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an uploaded PNG or JPEG and make it the source.
    ///
    /// On failure the previous image stays loaded.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_bytes(bytes).map_err(js_error)
    }

    /// Make raw RGBA pixels the source.
    pub fn load_pixels(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> Result<(), JsValue> {
        let buffer = PixelBuffer::try_new(width, height, pixels).map_err(js_error)?;
        self.inner.load(buffer);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Counter bumped whenever the source changes.
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u32 {
        self.inner.generation()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.source().map_or(0, |s| s.width)
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.source().map_or(0, |s| s.height)
    }

    /// A copy of the current adjustments.
    pub fn adjustments(&self) -> JsAdjustmentParameters {
        JsAdjustmentParameters::from_inner(self.inner.params().clone())
    }

    pub fn set_adjustments(&mut self, params: &JsAdjustmentParameters) {
        self.inner.set_params(params.inner().clone());
    }

    #[wasm_bindgen(getter)]
    pub fn filter(&self) -> String {
        self.inner.filter().as_str().to_string()
    }

    /// Select a filter preset by name, e.g. `"sepia"`.
    pub fn set_filter(&mut self, name: &str) -> Result<(), JsValue> {
        let filter: FilterType = name.parse().map_err(js_error)?;
        self.inner.set_filter(filter);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn tolerance(&self) -> f32 {
        self.inner.tolerance().value()
    }

    #[wasm_bindgen(setter)]
    pub fn set_tolerance(&mut self, value: f32) {
        self.inner.set_tolerance(Tolerance::new(value));
    }

    pub fn reset_adjustments(&mut self) {
        self.inner.reset_adjustments();
    }

    pub fn rotate_preview_clockwise(&mut self) {
        self.inner.rotate_preview_clockwise();
    }

    pub fn render_preview(&self) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .render_preview()
            .map(JsPixelBuffer::from_buffer)
            .map_err(js_error)
    }

    /// PNG of the preview as the user sees it.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.inner.export_png().map_err(js_error)
    }

    /// PNG of the unadjusted source.
    pub fn source_png(&self) -> Result<Vec<u8>, JsValue> {
        self.inner.source_png().map_err(js_error)
    }

    /// Magic wand at `(x, y)`. Returns the number of pixels erased.
    pub fn erase_region(&mut self, x: i32, y: i32) -> Result<usize, JsValue> {
        self.inner
            .erase_region(x as i64, y as i64)
            .map(|report| report.erased)
            .map_err(js_error)
    }

    /// Remove every pixel matching the color under `(x, y)`.
    pub fn erase_color_at(&mut self, x: i32, y: i32) -> Result<usize, JsValue> {
        self.inner
            .erase_color_at(x as i64, y as i64)
            .map(|report| report.erased)
            .map_err(js_error)
    }

    /// Remove every pixel matching `(r, g, b)`.
    pub fn erase_color(&mut self, r: u8, g: u8, b: u8) -> Result<usize, JsValue> {
        self.inner
            .erase_color([r, g, b])
            .map(|report| report.erased)
            .map_err(js_error)
    }

    pub fn rotate90(&mut self) -> Result<(), JsValue> {
        self.inner.rotate90().map_err(js_error)
    }

    pub fn flip_horizontal(&mut self) -> Result<(), JsValue> {
        self.inner.flip_horizontal().map_err(js_error)
    }

    pub fn flip_vertical(&mut self) -> Result<(), JsValue> {
        self.inner.flip_vertical().map_err(js_error)
    }

    /// Ticket to pass back with the service result.
    pub fn begin_background_removal(&self) -> Result<u32, JsValue> {
        self.inner
            .begin_background_removal()
            .map(GatewayTicket::generation)
            .map_err(js_error)
    }

    /// Install the image returned by the service.
    ///
    /// Bytes that do not decode count as an invalid service result. A
    /// ticket from before the last edit is rejected.
    pub fn complete_background_removal(&mut self, ticket: u32, bytes: &[u8]) -> Result<(), JsValue> {
        self.accept_result(ticket, bytes).map_err(js_error)
    }

    /// Report a failed service call. Returns the alert text for the user.
    ///
    /// The session is left unchanged.
    pub fn fail_background_removal(&mut self, ticket: u32, kind: &str, message: String) -> String {
        let failure = Err(gateway_error(kind, message));
        match self
            .inner
            .complete_background_removal(GatewayTicket::new(ticket), failure)
        {
            Err(EditError::GatewayFailure(err)) => err.user_message().to_string(),
            Err(other) => other.to_string(),
            Ok(()) => String::new(),
        }
    }
}

impl EditorSession {
    fn accept_result(&mut self, ticket: u32, bytes: &[u8]) -> Result<(), EditError> {
        let result =
            decode_image(bytes).map_err(|e| GatewayError::InvalidResult(e.to_string()));
        self.inner
            .complete_background_removal(GatewayTicket::new(ticket), result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_with_dot() -> Vec<u8> {
        let mut buffer = PixelBuffer::filled(4, 4, [255, 255, 255, 255]);
        buffer.set_pixel(1, 1, [0, 0, 0, 255]);
        buffer.pixels
    }

    fn loaded() -> EditorSession {
        let mut session = EditorSession::new();
        session.load_pixels(4, 4, white_with_dot()).unwrap();
        session
    }

    #[test]
    fn test_load_pixels() {
        let session = loaded();
        assert!(session.has_image());
        assert_eq!((session.width(), session.height()), (4, 4));
        assert_eq!(session.filter(), "NONE");
        assert_eq!(session.tolerance(), 30.0);
    }

    #[test]
    fn test_clear() {
        let mut session = loaded();
        session.clear();
        assert!(!session.has_image());
        assert_eq!(session.width(), 0);
    }

    #[test]
    fn test_adjustments_round_trip() {
        let mut session = loaded();
        let mut params = session.adjustments();
        params.set_brightness(25.0);
        session.set_adjustments(&params);
        assert_eq!(session.adjustments().brightness(), 25.0);

        session.reset_adjustments();
        assert!(session.adjustments().is_identity());
    }

    #[test]
    fn test_set_filter() {
        let mut session = loaded();
        session.set_filter("Sepia").unwrap();
        assert_eq!(session.filter(), "SEPIA");
    }

    #[test]
    fn test_rotate_preview_clockwise() {
        let mut session = loaded();
        for expected in [90, 180, 270, 0] {
            session.rotate_preview_clockwise();
            assert_eq!(session.adjustments().rotation_degrees(), expected);
        }
    }

    #[test]
    fn test_erase_region_commits() {
        let mut session = loaded();
        let mut params = session.adjustments();
        params.set_contrast(40.0);
        session.set_adjustments(&params);

        let erased = session.erase_region(0, 0).unwrap();
        assert_eq!(erased, 15);
        assert_eq!(session.generation(), 2);
        assert!(session.adjustments().is_identity());
        assert_eq!(session.render_preview().unwrap().erased_count(), 15);
    }

    #[test]
    fn test_noop_erase_keeps_generation() {
        let mut session = loaded();
        assert_eq!(session.erase_color(0, 0, 0).unwrap(), 1);
        assert_eq!(session.generation(), 2);
        // Already transparent, nothing left to erase
        assert_eq!(session.erase_color_at(1, 1).unwrap(), 0);
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_orthogonal_ops() {
        let mut session = EditorSession::new();
        session.load_pixels(3, 1, vec![0; 12]).unwrap();
        session.rotate90().unwrap();
        assert_eq!((session.width(), session.height()), (1, 3));
        session.flip_horizontal().unwrap();
        session.flip_vertical().unwrap();
        assert_eq!(session.generation(), 4);
    }

    #[test]
    fn test_background_removal_round_trip() {
        let mut session = loaded();
        let ticket = session.begin_background_removal().unwrap();
        let source = session.source_png().unwrap();

        let mut cutout = PixelBuffer::filled(4, 4, [0, 0, 0, 0]);
        cutout.set_pixel(1, 1, [0, 0, 0, 255]);
        let png = purecut_core::encode_png(&cutout).unwrap();

        assert!(!source.is_empty());
        assert!(session.accept_result(ticket, &png).is_ok());
        assert_eq!(session.render_preview().unwrap().erased_count(), 15);
        assert_eq!(session.generation(), ticket + 1);
    }

    #[test]
    fn test_stale_result_rejected() {
        let mut session = loaded();
        let ticket = session.begin_background_removal().unwrap();
        session.flip_vertical().unwrap();

        let png = purecut_core::encode_png(&PixelBuffer::transparent(4, 4)).unwrap();
        let err = session.accept_result(ticket, &png).unwrap_err();
        assert!(matches!(err, EditError::StaleGatewayResult { .. }));
        assert_eq!(session.render_preview().unwrap().erased_count(), 0);
    }

    #[test]
    fn test_garbage_result_is_gateway_failure() {
        let mut session = loaded();
        let ticket = session.begin_background_removal().unwrap();
        let err = session.accept_result(ticket, b"not an image").unwrap_err();
        assert!(matches!(
            err,
            EditError::GatewayFailure(GatewayError::InvalidResult(_))
        ));
        assert_eq!(session.generation(), ticket);
    }

    #[test]
    fn test_fail_background_removal() {
        let mut session = loaded();
        let ticket = session.begin_background_removal().unwrap();
        let message = session.fail_background_removal(ticket, "model-load", "wasm".into());
        assert_eq!(message, "AI Library not loaded. Please refresh the page.");
        assert_eq!(session.generation(), ticket);
    }

    #[test]
    fn test_export_png() {
        let png = loaded().export_png().unwrap();
        assert_eq!(&png[0..8], &purecut_core::encode::PNG_SIGNATURE);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_empty_session_errors() {
        let mut session = EditorSession::new();
        assert!(session.render_preview().is_err());
        assert!(session.export_png().is_err());
        assert!(session.erase_region(0, 0).is_err());
        assert!(session.begin_background_removal().is_err());
    }

    #[wasm_bindgen_test]
    fn test_invalid_inputs() {
        let mut session = EditorSession::new();
        assert!(session.load_image(&[1, 2, 3]).is_err());
        assert!(session.load_pixels(2, 2, vec![0; 3]).is_err());
        assert!(session.set_filter("lomo").is_err());
        assert!(!session.has_image());
    }
}
