//! WASM bindings for the background erasers.
//!
//! Both functions erase in place and return the number of pixels erased,
//! so the host can skip recording a history entry for a no-op.

use crate::types::{js_error, JsPixelBuffer};
use purecut_core::{eraser, Tolerance};
use wasm_bindgen::prelude::*;

/// Magic wand: erase the 4-connected region around `(x, y)`.
///
/// # Errors
///
/// Fails if the seed lies outside the image; the image is unchanged.
#[wasm_bindgen]
pub fn erase_region(
    image: &mut JsPixelBuffer,
    x: i32,
    y: i32,
    tolerance: f32,
) -> Result<usize, JsValue> {
    eraser::erase_region(
        image.buffer_mut(),
        x as i64,
        y as i64,
        Tolerance::new(tolerance),
    )
    .map(|report| report.erased)
    .map_err(js_error)
}

/// Erase every pixel whose color is within `tolerance` of `(r, g, b)`.
#[wasm_bindgen]
pub fn erase_color_range(image: &mut JsPixelBuffer, r: u8, g: u8, b: u8, tolerance: f32) -> usize {
    eraser::erase_color_range(image.buffer_mut(), [r, g, b], Tolerance::new(tolerance)).erased
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use purecut_core::PixelBuffer;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_erase_region_scenario() {
        let mut buffer = PixelBuffer::filled(4, 4, [10, 10, 10, 255]);
        buffer.set_pixel(2, 2, [200, 200, 200, 255]);
        let mut image = JsPixelBuffer::from_buffer(buffer);

        assert_eq!(erase_region(&mut image, 0, 0, 5.0).unwrap(), 15);
    }

    #[wasm_bindgen_test]
    fn test_erase_region_out_of_bounds() {
        let mut image = JsPixelBuffer::from_buffer(PixelBuffer::filled(2, 2, [1, 1, 1, 255]));
        assert!(erase_region(&mut image, -1, 0, 5.0).is_err());
        assert_eq!(image.erased_count(), 0);
    }
}
