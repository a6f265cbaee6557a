//! Error and metadata types for upload decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an uploaded file could not become a pixel buffer.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not a PNG or JPEG.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// Recognized header, broken body.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image exceeds the pixel budget.
    #[error("Image too large: {width}x{height} exceeds {max} pixels")]
    TooLarge { width: u32, height: u32, max: u64 },
}

/// How the camera says the stored pixels must be turned for display.
///
/// Discriminants are the EXIF tag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Mirror across the main diagonal.
    Transpose = 5,
    Rotate90CW = 6,
    /// Mirror across the anti-diagonal.
    Transverse = 7,
    Rotate270CW = 8,
}

impl Orientation {
    /// Displayed width and height are the stored height and width.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}
