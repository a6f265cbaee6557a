//! WASM bindings for talking to the background-removal service.
//!
//! The host owns the model call. These helpers format its progress
//! callbacks and turn its failures into the messages shown to the user.

use crate::types::js_error;
use purecut_core::gateway::{GatewayError, GatewayProgress, LOADING_MESSAGE};
use wasm_bindgen::prelude::*;

/// Status to show while the model downloads on first use.
#[wasm_bindgen]
pub fn loading_message() -> String {
    LOADING_MESSAGE.to_string()
}

/// Convert a raw `(key, current, total)` progress callback into
/// `{ key, percent, label }`.
#[wasm_bindgen]
pub fn gateway_progress(key: &str, current: f64, total: f64) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&GatewayProgress::from_counts(key, current, total))
        .map_err(js_error)
}

/// Just the `Processing: N%` label for a progress callback.
#[wasm_bindgen]
pub fn progress_label(current: f64, total: f64) -> String {
    GatewayProgress::from_counts("", current, total).label
}

/// Alert text for a failed service call.
///
/// `kind` is `"model-load"`, `"network"` or anything else for a bad result.
#[wasm_bindgen]
pub fn gateway_user_message(kind: &str, message: String) -> String {
    gateway_error(kind, message).user_message().to_string()
}

pub(crate) fn gateway_error(kind: &str, message: String) -> GatewayError {
    match kind {
        "model-load" => GatewayError::ModelLoad(message),
        "network" => GatewayError::Network(message),
        _ => GatewayError::InvalidResult(message),
    }
}
