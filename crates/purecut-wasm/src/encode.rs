//! Image encoding WASM bindings.
//!
//! This module exposes PNG export to JavaScript.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, export_filename } from '@purecut/wasm';
//!
//! const png = encode_png(preview);
//! const url = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
//! link.download = export_filename();
//! ```

use crate::types::{js_error, JsPixelBuffer};
use purecut_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image to PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.buffer()).map_err(js_error)
}

/// Encode raw RGBA pixel data (e.g. `ImageData.data`) to PNG bytes.
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_png_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png_rgba(pixels, width, height).map_err(js_error)
}

/// Suggested filename for downloads.
#[wasm_bindgen]
pub fn export_filename() -> String {
    encode::EXPORT_FILENAME.to_string()
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use purecut_core::PixelBuffer;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_signature() {
        let image = JsPixelBuffer::from_buffer(PixelBuffer::filled(4, 4, [1, 2, 3, 0]));
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[0..8], &encode::PNG_SIGNATURE);
    }

    #[wasm_bindgen_test]
    fn test_encode_png_rgba_invalid_length() {
        assert!(encode_png_rgba(&[0; 12], 2, 2).is_err());
        assert!(encode_png_rgba(&[], 0, 0).is_err());
    }
}
