//! JPEG segment scanning.
//!
//! A JPEG stream is a sequence of marker segments. EXIF metadata lives in an
//! APP1 segment whose payload starts with the identifier `"Exif\0\0"`,
//! followed directly by a TIFF header.
//!
//! # Segment Layout
//! ```text
//! Bytes 0-1: Marker (0xFF, code)
//! Bytes 2-3: Segment length, big-endian, counting these two bytes
//! Bytes 4-:  Segment payload
//! ```

use tracing::debug;

use crate::error::ExifError;
use crate::io::ByteCursor;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Start Of Scan marker
pub const SOS: [u8; 2] = [0xFF, 0xDA];

/// Application segment 0 (JFIF) marker
pub const APP0: [u8; 2] = [0xFF, 0xE0];

/// Application segment 1 (EXIF, XMP) marker
pub const APP1: [u8; 2] = [0xFF, 0xE1];

/// Identifier code at the start of an EXIF APP1 payload
pub const EXIF_SIGNATURE: [u8; 6] = *b"Exif\0\0";

/// Size of a segment's length field
const LENGTH_FIELD_SIZE: usize = 2;

/// Size of a marker
const MARKER_SIZE: usize = 2;

// =============================================================================
// ExifPayload
// =============================================================================

/// Location of the TIFF stream inside a JPEG buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifPayload {
    /// Absolute offset of the first TIFF header byte
    pub offset: usize,

    /// Declared payload length (segment length minus length field and signature)
    pub length: usize,
}

// =============================================================================
// Segment Scanning
// =============================================================================

/// Markers that carry no length field.
#[inline]
fn is_standalone(code: u8) -> bool {
    matches!(code, 0x01 | 0xD0..=0xD8)
}

/// Locate the EXIF payload in a JPEG buffer.
///
/// Scanning starts at byte 2, past SOI. APP0 and any other segment are
/// skipped by their declared length. The first APP1 segment carrying the
/// EXIF signature wins. Scanning stops at SOS or EOI, since metadata never
/// follows image data.
///
/// # Errors
/// `ExifMissing` if no EXIF segment is found before the buffer is exhausted.
pub fn locate_exif_payload(data: &[u8]) -> Result<ExifPayload, ExifError> {
    let cursor = ByteCursor::new(data);
    let mut pos = MARKER_SIZE;

    // A marker plus its length field must fit
    while pos + MARKER_SIZE + LENGTH_FIELD_SIZE <= data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }

        let marker = [data[pos], data[pos + 1]];
        match marker[1] {
            // Fill byte before a marker
            0xFF => {
                pos += 1;
                continue;
            }
            code if is_standalone(code) => {
                pos += MARKER_SIZE;
                continue;
            }
            _ => {}
        }

        if marker == SOS || marker == EOI {
            debug!(position = pos, "Reached image data without an EXIF segment");
            break;
        }

        let length = cursor
            .read_u16_be(pos + MARKER_SIZE)
            .map_err(|_| ExifError::ExifMissing)? as usize;
        if length < LENGTH_FIELD_SIZE {
            debug!(position = pos, length, "Invalid segment length");
            break;
        }

        if marker == APP1 {
            if let Some(payload) = exif_payload(&cursor, pos, length) {
                debug!(
                    offset = payload.offset,
                    length = payload.length,
                    "Found EXIF segment"
                );
                return Ok(payload);
            }
        } else if marker == APP0 {
            debug!(position = pos, length, "Skipping APP0 segment");
        }

        pos += MARKER_SIZE + length;
    }

    Err(ExifError::ExifMissing)
}

/// Check an APP1 segment for the EXIF signature.
fn exif_payload(cursor: &ByteCursor<'_>, pos: usize, length: usize) -> Option<ExifPayload> {
    let signature_at = pos + MARKER_SIZE + LENGTH_FIELD_SIZE;
    let signature = cursor.slice(signature_at, EXIF_SIGNATURE.len()).ok()?;
    if signature != EXIF_SIGNATURE {
        return None;
    }

    Some(ExifPayload {
        offset: signature_at + EXIF_SIGNATURE.len(),
        length: length.saturating_sub(LENGTH_FIELD_SIZE + EXIF_SIGNATURE.len()),
    })
}

/// Check if data starts with the SOI marker.
pub fn is_jpeg(data: &[u8]) -> bool {
    data.starts_with(&SOI)
}

/// Check if data starts with SOI and ends with EOI.
pub fn is_complete_jpeg(data: &[u8]) -> bool {
    data.len() >= 4 && is_jpeg(data) && data.ends_with(&EOI)
}

// =============================================================================
// Tests
// =============================================================================
