use thiserror::Error;

/// Errors raised by bounds-checked reads over the input buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IoError {
    /// Requested range exceeds the buffer
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: usize,
        requested: usize,
        size: usize,
    },

    /// Offset arithmetic overflowed the address space
    #[error("Offset overflow: {base} + {delta}")]
    OffsetOverflow { base: usize, delta: usize },
}

/// Errors local to a single directory entry.
///
/// These never abort a directory walk: the offending entry is skipped and
/// its tag is absent from the result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// SHORT field with a component count other than 1
    #[error("SHORT field must have count 1, got {0}")]
    ShortCount(u32),

    /// LONG or SLONG field with a component count other than 1
    #[error("LONG field must have count 1, got {0}")]
    LongCount(u32),

    /// RATIONAL or SRATIONAL field with a component count other than 1
    #[error("RATIONAL field must have count 1, got {0}")]
    RationalCount(u32),

    /// UNDEFINED field whose tag has no known rendering, or whose count is unsupported
    #[error("Unsupported UNDEFINED field: tag 0x{tag:04X} with count {count}")]
    UnknownUndefined { tag: u16, count: u32 },

    /// Type code outside the supported set
    #[error("Unknown field type: {0}")]
    UnknownFieldType(u16),

    /// Value payload lies outside the buffer
    #[error("Value out of bounds: {0}")]
    Io(#[from] IoError),
}

/// Errors that abort an entire extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExifError {
    /// No APP1 segment carrying the "Exif\0\0" signature
    #[error("EXIF segment not found")]
    ExifMissing,

    /// Byte-order mark is neither "II" nor "MM"
    #[error("Invalid byte order mark: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    EndianMissing(u16),

    /// TIFF magic number is not 42
    #[error("Invalid TIFF magic: expected 42, got {0}")]
    TiffMissing(u16),

    /// Buffer ends inside the TIFF header
    #[error("TIFF header truncated")]
    TruncatedHeader,

    /// First IFD offset points outside the buffer
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u32),

    /// Serialized output does not fit the caller's capacity
    #[error("Output too small: need {required} bytes, capacity is {capacity}")]
    OutputTooSmall { required: usize, capacity: usize },

    /// Result could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Image container other than JPEG
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(&'static str),
}
