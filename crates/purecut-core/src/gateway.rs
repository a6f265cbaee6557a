//! Contract types for the external background-removal service.
//!
//! The model call itself lives in the host. The core only formats its
//! progress callbacks, classifies its failures and accepts its result
//! through [`crate::EditSession::complete_background_removal`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status shown while the model assets download for the first time.
pub const LOADING_MESSAGE: &str = "Downloading AI Model... (This happens once)";

/// Errors reported by the background-removal service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The model or its runtime could not be loaded.
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    /// Fetching model assets failed.
    #[error("Network error: {0}")]
    Network(String),

    /// The service returned something that is not a usable image.
    #[error("Invalid result: {0}")]
    InvalidResult(String),
}

impl GatewayError {
    /// Message suitable for an alert in the host UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            GatewayError::ModelLoad(_) => "AI Library not loaded. Please refresh the page.",
            GatewayError::Network(_) | GatewayError::InvalidResult(_) => {
                "Failed to remove background. Ensure you have an internet connection for the first run."
            }
        }
    }
}

/// One progress notification from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayProgress {
    /// Asset or phase the service is reporting on
    pub key: String,
    /// Completion in whole percent (0 to 100)
    pub percent: u8,
    /// Status line for the host, e.g. `Processing: 42%`
    pub label: String,
}

impl GatewayProgress {
    /// Build a progress update from the raw `(key, current, total)` callback.
    ///
    /// A zero or non-finite total reports 0%. Overshooting counts cap at 100%.
    pub fn from_counts(key: impl Into<String>, current: f64, total: f64) -> Self {
        let percent = if total > 0.0 && total.is_finite() && current.is_finite() {
            (current / total * 100.0).round().clamp(0.0, 100.0) as u8
        } else {
            0
        };

        Self {
            key: key.into(),
            percent,
            label: format!("Processing: {percent}%"),
        }
    }
}

/// Receipt for an outstanding background-removal call.
///
/// Records which generation of the canonical buffer was sent, so a result
/// that arrives after the buffer changed can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GatewayTicket {
    generation: u32,
}

impl GatewayTicket {
    /// Rebuild a ticket from a generation handed across a host boundary.
    pub fn new(generation: u32) -> Self {
        Self { generation }
    }

    /// Source generation this ticket was issued for.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_rounds_percent() {
        let p = GatewayProgress::from_counts("fetch:/models/isnet", 1.0, 3.0);
        assert_eq!(p.percent, 33);
        assert_eq!(p.label, "Processing: 33%");
        assert_eq!(p.key, "fetch:/models/isnet");

        let p = GatewayProgress::from_counts("compute", 2.0, 3.0);
        assert_eq!(p.percent, 67);
    }

    #[test]
    fn test_progress_bounds() {
        assert_eq!(GatewayProgress::from_counts("k", 0.0, 10.0).percent, 0);
        assert_eq!(GatewayProgress::from_counts("k", 10.0, 10.0).percent, 100);
        assert_eq!(GatewayProgress::from_counts("k", 15.0, 10.0).percent, 100);
        assert_eq!(GatewayProgress::from_counts("k", -3.0, 10.0).percent, 0);
    }

    #[test]
    fn test_progress_degenerate_total() {
        let p = GatewayProgress::from_counts("k", 5.0, 0.0);
        assert_eq!(p.percent, 0);
        assert_eq!(p.label, "Processing: 0%");
        assert_eq!(GatewayProgress::from_counts("k", 5.0, f64::NAN).percent, 0);
        assert_eq!(GatewayProgress::from_counts("k", f64::INFINITY, 1.0).percent, 0);
    }

    #[test]
    fn test_progress_serializes() {
        let p = GatewayProgress::from_counts("compute", 1.0, 2.0);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"percent\":50"));
        assert!(json.contains("\"label\":\"Processing: 50%\""));
    }

    #[test]
    fn test_error_messages() {
        let err = GatewayError::Network("timeout".to_string());
        assert_eq!(err.to_string(), "Network error: timeout");
        assert!(err.user_message().contains("internet connection"));
        assert!(GatewayError::ModelLoad("missing".into())
            .user_message()
            .contains("refresh"));
    }
}
