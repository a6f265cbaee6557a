//! Errors raised by editing operations.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::gateway::GatewayError;

/// Errors from operations on the canonical buffer.
///
/// Every variant is reported before any pixel is touched, so a failed
/// operation leaves the buffer exactly as it was.
#[derive(Debug, Error)]
pub enum EditError {
    /// A seed or pick point lies outside the image.
    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} image")]
    InvalidCoordinate {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// The session has no image loaded.
    #[error("No image loaded")]
    NoImage,

    /// The background-removal service failed.
    #[error("Background removal failed: {0}")]
    GatewayFailure(#[from] GatewayError),

    /// A background-removal result arrived after the source was replaced.
    #[error("Stale background-removal result: issued for generation {ticket}, source is at {current}")]
    StaleGatewayResult { ticket: u32, current: u32 },

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_coordinate_message() {
        let err = EditError::InvalidCoordinate {
            x: -1,
            y: 7,
            width: 4,
            height: 4,
        };
        assert_eq!(err.to_string(), "Coordinate (-1, 7) is outside the 4x4 image");
    }

    #[test]
    fn test_gateway_error_converts() {
        let err: EditError = GatewayError::ModelLoad("onnx".to_string()).into();
        assert!(matches!(err, EditError::GatewayFailure(_)));
        assert_eq!(err.to_string(), "Background removal failed: Model load failed: onnx");
    }

    #[test]
    fn test_transparent_wrappers() {
        let err: EditError = DecodeError::InvalidFormat.into();
        assert_eq!(err.to_string(), DecodeError::InvalidFormat.to_string());
    }
}
