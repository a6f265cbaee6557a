//! Geometric transforms: quarter turns, flips and free rotation.
//!
//! # Destructive vs preview transforms
//!
//! - `rotate90`, `flip_horizontal` and `flip_vertical` are user actions that
//!   replace the canonical buffer. They are exact pixel permutations.
//! - `rotate_arbitrary` is the compositor's preview resampling step. It keeps
//!   the input dimensions and samples through the inverse transform.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Positive angles rotate clockwise on screen
//! - Rotation is about the buffer center

mod orthogonal;
mod rotation;

pub use orthogonal::{flip_horizontal, flip_vertical, rotate90};
pub use rotation::{rotate_arbitrary, rotate_arbitrary_with, InterpolationFilter};
