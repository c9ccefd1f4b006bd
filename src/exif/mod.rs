//! EXIF extraction.
//!
//! Ties the layers together: locate the EXIF payload in a JPEG, open its
//! TIFF directory, decode every entry and collect the results.
//!
//! Errors come in two severities. Structural problems (no EXIF segment, bad
//! byte order mark, bad magic, output capacity) abort the extraction. Field
//! problems (bad counts, out-of-range offsets, unknown UNDEFINED tags) only
//! drop the offending tag from the result.

mod fields;

use tracing::{debug, trace, warn};

use crate::error::ExifError;
use crate::format::tiff::{tag_name, Directory, FieldDecoder, UNKNOWN_TAG_NAME};
use crate::format::{detect_format, locate_exif_payload};

pub use fields::{DecodedField, ExifFields};

/// Default output capacity in bytes.
pub const DEFAULT_OUTPUT_CAPACITY: usize = 64 * 1024;

/// Decode the EXIF metadata of a JPEG buffer.
///
/// # Errors
/// - `ExifMissing` if no EXIF APP1 segment exists
/// - `EndianMissing`, `TiffMissing`, `TruncatedHeader`, `InvalidIfdOffset`
///   for a broken TIFF header
pub fn parse_jpeg(data: &[u8]) -> Result<ExifFields, ExifError> {
    let payload = locate_exif_payload(data)?;
    let directory = Directory::open(data, payload.offset)?;
    let decoder = FieldDecoder::new(data, directory.header());

    let mut fields = ExifFields::new();
    let mut skipped = 0usize;

    for entry in directory.entries() {
        let name = tag_name(entry.tag);
        if name == UNKNOWN_TAG_NAME {
            trace!(tag = entry.tag, ifd = entry.ifd.name(), "Dropping unknown tag");
            continue;
        }

        match decoder.decode(&entry) {
            Ok(value) => {
                fields.record(name, value.to_string());
            }
            Err(e) => {
                skipped += 1;
                warn!(
                    tag = name,
                    field_type = entry.field_type_raw,
                    count = entry.count,
                    "Skipping field: {}",
                    e
                );
            }
        }
    }

    debug!(fields = fields.len(), skipped, "Decoded EXIF directory");
    Ok(fields)
}

/// Decode a JPEG buffer and serialize the result within `capacity` bytes.
pub fn parse_jpeg_to_json(data: &[u8], capacity: usize) -> Result<String, ExifError> {
    parse_jpeg(data)?.finalize(capacity)
}

/// Sniff the image format, then decode its EXIF metadata.
///
/// # Errors
/// `UnsupportedFormat` for recognized non-JPEG containers and unknown data,
/// otherwise as [`parse_jpeg`].
pub fn extract(data: &[u8]) -> Result<ExifFields, ExifError> {
    match detect_format(data) {
        Some(format) if format.is_supported() => parse_jpeg(data),
        Some(format) => Err(ExifError::UnsupportedFormat(format.name())),
        None => Err(ExifError::UnsupportedFormat("unknown")),
    }
}

// =============================================================================
// Tests
// =============================================================================
