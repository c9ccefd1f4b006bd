//! EXIF field types and the tag catalog.
//!
//! This module defines the vocabulary for directory decoding:
//! - Field types that determine how values are encoded
//! - Tag IDs and their human-readable names

// =============================================================================
// Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
///
/// Only the types EXIF metadata actually uses are defined. Anything else
/// is a per-entry decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two unsigned 32-bit integers: numerator, denominator (8 bytes)
    Rational = 5,

    /// Undefined byte data (1 byte per element)
    Undefined = 7,

    /// Signed 32-bit integer (4 bytes)
    SLong = 9,

    /// Two signed 32-bit integers: numerator, denominator (8 bytes)
    SRational = 10,
}

impl FieldType {
    /// Size of a single component of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => 1,
            FieldType::Short => 2,
            FieldType::Long | FieldType::SLong => 4,
            FieldType::Rational | FieldType::SRational => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unsupported or unknown type values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            7 => Some(FieldType::Undefined),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            _ => None,
        }
    }

    /// Bytes available for an inline value in a directory entry.
    pub const INLINE_THRESHOLD: usize = 4;

    /// Total on-disk size of `count` components, or `None` on overflow.
    #[inline]
    pub fn byte_size(self, count: u32) -> Option<usize> {
        (count as usize).checked_mul(self.size_in_bytes())
    }

    /// Check if `count` components fit inline in the 4-byte value field.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        matches!(self.byte_size(count), Some(size) if size <= Self::INLINE_THRESHOLD)
    }
}

// =============================================================================
// Tag Catalog
// =============================================================================

/// Name reported for tag IDs missing from the catalog.
pub const UNKNOWN_TAG_NAME: &str = "Unknown";

macro_rules! exif_tags {
    ($($(#[$doc:meta])* $name:ident = $id:literal,)+) => {
        /// EXIF tags known to the decoder.
        ///
        /// Covers the IFD0 tags a camera typically writes plus the EXIF
        /// sub-IFD. Extending the catalog is a data change only.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum ExifTag {
            $($(#[$doc])* $name = $id,)+
        }

        impl ExifTag {
            /// Create an ExifTag from its numeric value.
            pub fn from_u16(value: u16) -> Option<Self> {
                match value {
                    $($id => Some(ExifTag::$name),)+
                    _ => None,
                }
            }

            /// Human-readable tag name, used as the output key.
            pub const fn name(self) -> &'static str {
                match self {
                    $(ExifTag::$name => stringify!($name),)+
                }
            }
        }
    };
}

exif_tags! {
    // -------------------------------------------------------------------------
    // IFD0
    // -------------------------------------------------------------------------
    ImageDescription = 0x010E,
    Make = 0x010F,
    Model = 0x0110,
    Orientation = 0x0112,
    XResolution = 0x011A,
    YResolution = 0x011B,
    ResolutionUnit = 0x0128,
    Software = 0x0131,
    DateTime = 0x0132,
    Artist = 0x013B,
    WhitePoint = 0x013E,
    PrimaryChromaticities = 0x013F,
    YCbCrCoefficients = 0x0211,
    YCbCrPositioning = 0x0213,
    ReferenceBlackWhite = 0x0214,
    Copyright = 0x8298,
    /// Pointer to the EXIF sub-IFD; structural, never emitted as a value
    ExifOffset = 0x8769,

    // -------------------------------------------------------------------------
    // EXIF sub-IFD
    // -------------------------------------------------------------------------
    ExposureTime = 0x829A,
    FNumber = 0x829D,
    ExposureProgram = 0x8822,
    ISOSpeedRatings = 0x8827,
    ExifVersion = 0x9000,
    DateTimeOriginal = 0x9003,
    DateTimeDigitized = 0x9004,
    ComponentsConfiguration = 0x9101,
    CompressedBitsPerPixel = 0x9102,
    ShutterSpeedValue = 0x9201,
    ApertureValue = 0x9202,
    BrightnessValue = 0x9203,
    ExposureBiasValue = 0x9204,
    MaxApertureValue = 0x9205,
    SubjectDistance = 0x9206,
    MeteringMode = 0x9207,
    LightSource = 0x9208,
    Flash = 0x9209,
    FocalLength = 0x920A,
    SubSecTime = 0x9290,
    SubSecTimeOriginal = 0x9291,
    SubSecTimeDigitized = 0x9292,
    FlashpixVersion = 0xA000,
    ColorSpace = 0xA001,
    PixelXDimension = 0xA002,
    PixelYDimension = 0xA003,
    FileSource = 0xA300,
    SceneType = 0xA301,
    ExposureMode = 0xA402,
    WhiteBalance = 0xA403,
    DigitalZoomRatio = 0xA404,
    FocalLengthIn35mmFilm = 0xA405,
    SceneCaptureType = 0xA406,
}

impl ExifTag {
    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

/// Look up the name for a raw tag ID, falling back to [`UNKNOWN_TAG_NAME`].
pub fn tag_name(tag: u16) -> &'static str {
    ExifTag::from_u16(tag).map_or(UNKNOWN_TAG_NAME, ExifTag::name)
}

// =============================================================================
// Tests
// =============================================================================
