//! PureCut Core - pixel engine for the PureCut image editor
//!
//! This crate provides the deterministic image processing behind the editor:
//! color adjustments, filter presets, the preview compositor, magic-wand and
//! color-range background erasing, geometric transforms, PNG export and the
//! editing session that owns the canonical source buffer.

pub mod adjustments;
pub mod blur;
pub mod buffer;
pub mod compositor;
pub mod decode;
pub mod encode;
pub mod eraser;
pub mod error;
pub mod filters;
pub mod gateway;
pub mod luminance;
pub mod session;
pub mod transform;

use std::fmt;
use std::str::FromStr;

pub use buffer::{BufferError, PixelBuffer};
pub use compositor::render;
pub use decode::{decode_image, DecodeError};
pub use encode::{encode_png, EncodeError, EXPORT_FILENAME};
pub use error::EditError;
pub use eraser::{erase_color_at, erase_color_range, erase_region, EraseReport};
pub use gateway::{GatewayError, GatewayProgress, GatewayTicket};
pub use session::EditSession;
pub use transform::{
    flip_horizontal, flip_vertical, rotate90, rotate_arbitrary, InterpolationFilter,
};

/// Default color tolerance for the magic wand and color-range removal.
pub const DEFAULT_TOLERANCE: f32 = 30.0;

/// Adjustment parameters for the non-destructive preview.
///
/// Every field defaults to its identity value. Brightness, contrast and
/// saturation use the signed offset convention: 0 means no change.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdjustmentParameters {
    /// Brightness offset added to every channel (-100 to 100)
    pub brightness: f32,
    /// Contrast offset mapped through the 259 curve (-100 to 100)
    pub contrast: f32,
    /// Saturation offset about luma (-100 to 100)
    pub saturation: f32,
    /// Gaussian blur radius in pixels (>= 0)
    pub blur: f32,
    /// Partial grayscale amount (0 to 100)
    pub grayscale_percent: f32,
    /// Partial sepia amount (0 to 100)
    pub sepia_percent: f32,
    /// Rotation about the image center in degrees, clockwise
    pub rotation_degrees: i32,
    /// Mirror horizontally before rotating
    pub mirror_horizontal: bool,
}

impl Default for AdjustmentParameters {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 0.0,
            saturation: 0.0,
            blur: 0.0,
            grayscale_percent: 0.0,
            sepia_percent: 0.0,
            rotation_degrees: 0,
            mirror_horizontal: false,
        }
    }
}

impl AdjustmentParameters {
    /// Create new parameters with identity values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their identity defaults
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the per-pixel color stage changes anything.
    pub fn affects_color(&self) -> bool {
        self.brightness != 0.0
            || self.contrast != 0.0
            || self.saturation != 0.0
            || self.grayscale_percent > 0.0
            || self.sepia_percent > 0.0
    }

    /// Whether the geometric resampling stage changes anything.
    pub fn affects_geometry(&self) -> bool {
        self.normalized_rotation() != 0 || self.mirror_horizontal
    }

    /// Rotation normalized into `0..360`.
    pub fn normalized_rotation(&self) -> i32 {
        self.rotation_degrees.rem_euclid(360)
    }
}

/// Stylized color preset applied before adjustments.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterType {
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    Vintage,
    Kodachrome,
    Technicolor,
}

impl FilterType {
    /// Every preset, in the order the host lists them.
    pub const ALL: [FilterType; 7] = [
        FilterType::None,
        FilterType::Grayscale,
        FilterType::Sepia,
        FilterType::Invert,
        FilterType::Vintage,
        FilterType::Kodachrome,
        FilterType::Technicolor,
    ];

    /// Host-facing name of the preset.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::None => "NONE",
            FilterType::Grayscale => "GRAYSCALE",
            FilterType::Sepia => "SEPIA",
            FilterType::Invert => "INVERT",
            FilterType::Vintage => "VINTAGE",
            FilterType::Kodachrome => "KODACHROME",
            FilterType::Technicolor => "TECHNICOLOR",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown filter: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for FilterType {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterType::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

/// Color-distance acceptance threshold for erasing.
///
/// Negative and NaN inputs are stored as 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Tolerance(f32);

impl Tolerance {
    pub fn new(value: f32) -> Self {
        if value.is_nan() || value < 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}

impl From<f32> for Tolerance {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Tolerance> for f32 {
    fn from(value: Tolerance) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustments_default_is_identity() {
        let adj = AdjustmentParameters::new();
        assert!(adj.is_identity());
        assert!(!adj.affects_color());
        assert!(!adj.affects_geometry());
    }

    #[test]
    fn test_adjustments_not_identity() {
        let mut adj = AdjustmentParameters::new();
        adj.brightness = 10.0;
        assert!(!adj.is_identity());
        assert!(adj.affects_color());

        let mut adj = AdjustmentParameters::new();
        adj.blur = 2.0;
        assert!(!adj.is_identity());
        assert!(!adj.affects_color());
    }

    #[test]
    fn test_rotation_normalization() {
        let mut adj = AdjustmentParameters::new();
        adj.rotation_degrees = 450;
        assert_eq!(adj.normalized_rotation(), 90);
        adj.rotation_degrees = -90;
        assert_eq!(adj.normalized_rotation(), 270);
        adj.rotation_degrees = 720;
        assert_eq!(adj.normalized_rotation(), 0);
        assert!(!adj.affects_geometry());
    }

    #[test]
    fn test_partial_json_fills_identity() {
        let adj: AdjustmentParameters =
            serde_json::from_str(r#"{"brightness": 25.0, "mirror_horizontal": true}"#).unwrap();
        assert_eq!(adj.brightness, 25.0);
        assert!(adj.mirror_horizontal);
        assert_eq!(adj.contrast, 0.0);
        assert_eq!(adj.rotation_degrees, 0);
    }

    #[test]
    fn test_filter_names_round_trip() {
        for filter in FilterType::ALL {
            assert_eq!(filter.as_str().parse::<FilterType>(), Ok(filter));
        }
        assert_eq!("sepia".parse::<FilterType>(), Ok(FilterType::Sepia));
        assert_eq!(
            "posterize".parse::<FilterType>(),
            Err(UnknownFilter("posterize".to_string()))
        );
    }

    #[test]
    fn test_filter_serde_matches_host_names() {
        let json = serde_json::to_string(&FilterType::Kodachrome).unwrap();
        assert_eq!(json, r#""KODACHROME""#);
        let parsed: FilterType = serde_json::from_str(r#""TECHNICOLOR""#).unwrap();
        assert_eq!(parsed, FilterType::Technicolor);
    }

    #[test]
    fn test_tolerance_clamps_negative() {
        assert_eq!(Tolerance::new(-5.0).value(), 0.0);
        assert_eq!(Tolerance::new(f32::NAN).value(), 0.0);
        assert_eq!(Tolerance::new(12.5).value(), 12.5);
        assert_eq!(Tolerance::default().value(), DEFAULT_TOLERANCE);
    }
}
