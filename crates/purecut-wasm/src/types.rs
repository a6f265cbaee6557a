//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core PureCut
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use std::fmt::Display;

use purecut_core::PixelBuffer;
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()` or
/// `image_data()`, a copy is made to JavaScript memory. Keep images in WASM
/// memory between operations and only extract pixels for display.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new image from dimensions and RGBA pixel data.
    ///
    /// Fails if `pixels.length != width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::try_new(width, height, pixels)
            .map(Self::from_buffer)
            .map_err(js_error)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Number of fully erased (alpha 0) pixels.
    #[wasm_bindgen(getter)]
    pub fn erased_count(&self) -> usize {
        self.inner.erased_count()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Returns RGBA pixel data as a `Uint8ClampedArray`, ready for
    /// `new ImageData(data, width, height)`.
    pub fn image_data(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.inner.pixels.as_slice())
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn buffer(&self) -> &PixelBuffer {
        &self.inner
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.inner
    }
}

/// Convert any displayable error into a JavaScript error value.
pub(crate) fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_constructor_validates_length() {
        assert!(JsPixelBuffer::new(2, 2, vec![0; 16]).is_ok());
        assert!(JsPixelBuffer::new(2, 2, vec![0; 12]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_image_data_copy() {
        let img = JsPixelBuffer::from_buffer(PixelBuffer::filled(2, 1, [10, 20, 30, 40]));
        let data = img.image_data();
        assert_eq!(data.length(), 8);
        assert_eq!(data.to_vec(), img.pixels());
    }
}
