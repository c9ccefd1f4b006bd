//! Image format detection.
//!
//! Formats are identified from their leading magic bytes. Only JPEG carries
//! metadata this crate can decode; the other containers are recognized so
//! callers get a precise "unsupported" error instead of "EXIF missing".

use super::jpeg::is_jpeg;

// =============================================================================
// ImageFormat
// =============================================================================

/// Detected image container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG / JFIF / EXIF
    Jpeg,

    /// Portable Network Graphics
    Png,

    /// AV1 Image File Format (ISO-BMFF)
    Avif,

    /// High Efficiency Image File Format (ISO-BMFF)
    Heic,

    /// WebP (RIFF)
    Webp,
}

impl ImageFormat {
    /// Get a human-readable name for the format.
    pub const fn name(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
            ImageFormat::Avif => "AVIF",
            ImageFormat::Heic => "HEIC",
            ImageFormat::Webp => "WebP",
        }
    }

    /// Whether EXIF extraction is implemented for this format.
    #[inline]
    pub const fn is_supported(self) -> bool {
        matches!(self, ImageFormat::Jpeg)
    }
}

// =============================================================================
// Format Detection
// =============================================================================

/// PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// HEIF-family major brands.
const HEIC_BRANDS: [&[u8; 4]; 4] = [b"heic", b"heix", b"mif1", b"msf1"];

/// Detect the container format of an image buffer.
///
/// Returns `None` when no known signature matches.
pub fn detect_format(data: &[u8]) -> Option<ImageFormat> {
    if is_jpeg(data) {
        return Some(ImageFormat::Jpeg);
    }
    if is_png(data) {
        return Some(ImageFormat::Png);
    }
    if is_webp(data) {
        return Some(ImageFormat::Webp);
    }

    // ISO-BMFF: 4-byte box size, "ftyp", 4-byte major brand
    match ftyp_brand(data)? {
        b"avif" | b"avis" => Some(ImageFormat::Avif),
        brand if HEIC_BRANDS.contains(&brand) => Some(ImageFormat::Heic),
        _ => None,
    }
}

/// Check for the PNG signature.
pub fn is_png(data: &[u8]) -> bool {
    data.starts_with(&PNG_SIGNATURE)
}

/// Check for a RIFF container with the WEBP form type.
pub fn is_webp(data: &[u8]) -> bool {
    data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP"
}

/// Check for an AVIF `ftyp` box.
pub fn is_avif(data: &[u8]) -> bool {
    matches!(detect_format(data), Some(ImageFormat::Avif))
}

/// Check for a HEIC `ftyp` box.
pub fn is_heic(data: &[u8]) -> bool {
    matches!(detect_format(data), Some(ImageFormat::Heic))
}

fn ftyp_brand(data: &[u8]) -> Option<&[u8; 4]> {
    if data.len() < 12 || &data[4..8] != b"ftyp" {
        return None;
    }
    data[8..12].try_into().ok()
}

// =============================================================================
// Tests
// =============================================================================
