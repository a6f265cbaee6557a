//! PureCut WASM - WebAssembly bindings for the PureCut editor
//!
//! This crate exposes the purecut-core pixel engine to the browser host.
//!
//! # Module Structure
//!
//! - `session` - Stateful editor handle covering the whole edit flow
//! - `adjustments` - Adjustment parameters and one-shot preview rendering
//! - `eraser` - Magic wand and color-range erasers
//! - `transform` - Quarter turns, flips and free rotation
//! - `decode` - Upload decoding (PNG, JPEG)
//! - `encode` - PNG export
//! - `gateway` - Helpers for the background-removal service
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { EditorSession } from '@purecut/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new EditorSession();
//! editor.load_image(new Uint8Array(await file.arrayBuffer()));
//! editor.erase_region(0, 0);
//! const png = editor.export_png();
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod decode;
mod encode;
mod eraser;
mod gateway;
mod session;
mod transform;
mod types;

// Re-export public types
pub use adjustments::{filter_names, render, JsAdjustmentParameters};
pub use decode::{decode_image, get_orientation};
pub use encode::{encode_png, encode_png_rgba, export_filename};
pub use eraser::{erase_color_range, erase_region};
pub use gateway::{gateway_progress, gateway_user_message, loading_message, progress_label};
pub use session::EditorSession;
pub use transform::{flip_horizontal, flip_vertical, rotate90, rotate_arbitrary};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
