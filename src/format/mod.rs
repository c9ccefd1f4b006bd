//! Image format parsing.
//!
//! - [`detect`] identifies the image container from its magic bytes
//! - [`jpeg`] walks JPEG marker segments to find the EXIF payload
//! - [`tiff`] decodes the TIFF directories inside that payload

pub mod detect;
pub mod jpeg;
pub mod tiff;

pub use detect::{detect_format, ImageFormat};
pub use jpeg::{is_complete_jpeg, is_jpeg, locate_exif_payload, ExifPayload};
