//! Image export.
//!
//! Exports are lossless PNG so erased (alpha 0) regions stay transparent
//! in the downloaded file.
//!
//! # Examples
//!
//! ```ignore
//! use purecut_core::encode::{encode_png, EXPORT_FILENAME};
//!
//! let png = encode_png(&buffer)?;
//! host.download(EXPORT_FILENAME, &png);
//! ```

mod png;

pub use png::{encode_png, encode_png_rgba, EncodeError, EXPORT_FILENAME, PNG_SIGNATURE};
