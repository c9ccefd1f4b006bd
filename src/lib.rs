//! # EXIF Extract
//!
//! Extracts EXIF metadata from JPEG images into an ordered tag/value mapping.
//!
//! The decoder is a pure function of an immutable byte buffer: it never
//! touches the filesystem, holds no shared mutable state, and may be called
//! concurrently on independent buffers. Every read is bounds-checked, so
//! truncated or hostile input yields an error or a partial result, never an
//! out-of-bounds access.
//!
//! ## Architecture
//!
//! - [`io`] - Bounds-checked byte cursor and endian helpers
//! - [`mod@format`] - Format sniffing, JPEG segment scanning, TIFF directories
//! - [`exif`] - Extraction service and the result mapping
//! - [`config`] - CLI configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_extract::{parse_jpeg, DEFAULT_OUTPUT_CAPACITY};
//!
//! let data = std::fs::read("photo.jpg").unwrap();
//! let fields = parse_jpeg(&data).unwrap();
//! if let Some(model) = fields.get("Model") {
//!     println!("Taken with {}", model);
//! }
//! println!("{}", fields.finalize(DEFAULT_OUTPUT_CAPACITY).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod io;

// Re-export commonly used types
pub use config::Config;
pub use error::{ExifError, FieldError, IoError};
pub use exif::{
    extract, parse_jpeg, parse_jpeg_to_json, DecodedField, ExifFields, DEFAULT_OUTPUT_CAPACITY,
};
pub use format::tiff::{
    tag_name, ByteOrder, Directory, DirectoryEntries, DirectoryEntry, ExifTag, FieldDecoder,
    FieldType, IfdKind, ResolvedValue, TiffHeader,
};
pub use format::{
    detect_format, is_complete_jpeg, is_jpeg, locate_exif_payload, ExifPayload, ImageFormat,
};
pub use io::ByteCursor;
