//! Image decoding for uploads.
//!
//! Turns the bytes of a user-supplied PNG or JPEG into the canonical RGBA
//! [`PixelBuffer`](crate::buffer::PixelBuffer). All operations are
//! synchronous and single-threaded.

mod types;
mod upload;

pub use types::{DecodeError, Orientation};
pub use upload::{decode_image, get_orientation, MAX_DECODE_PIXELS};
