//! Directory entries.
//!
//! # IFD Entry Structure (12 bytes)
//! ```text
//! Bytes 0-1:  Tag ID
//! Bytes 2-3:  Field type
//! Bytes 4-7:  Component count
//! Bytes 8-11: Value (if it fits in 4 bytes) or offset from the TIFF base
//! ```

use super::header::ByteOrder;
use super::tags::FieldType;

/// Size of a directory entry in bytes.
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count field at the start of a directory.
pub const IFD_COUNT_SIZE: usize = 2;

/// Which directory an entry was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfdKind {
    /// The primary image directory
    Ifd0,
    /// The EXIF sub-directory pointed to by ExifOffset
    Exif,
}

impl IfdKind {
    pub const fn name(self) -> &'static str {
        match self {
            IfdKind::Ifd0 => "IFD0",
            IfdKind::Exif => "EXIF",
        }
    }
}

/// A single 12-byte directory record.
///
/// The type code is kept raw: an unknown type is a decode failure for this
/// entry only, never for the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Tag ID
    pub tag: u16,

    /// Raw field type code
    pub field_type_raw: u16,

    /// Number of typed components
    pub count: u32,

    /// The value itself, or an offset to it, in the directory's byte order
    pub raw_value: [u8; 4],

    /// Directory this entry belongs to
    pub ifd: IfdKind,
}

impl DirectoryEntry {
    /// Parse an entry from its 12 on-disk bytes.
    pub fn parse(bytes: [u8; IFD_ENTRY_SIZE], byte_order: ByteOrder, ifd: IfdKind) -> Self {
        DirectoryEntry {
            tag: byte_order.read_u16([bytes[0], bytes[1]]),
            field_type_raw: byte_order.read_u16([bytes[2], bytes[3]]),
            count: byte_order.read_u32([bytes[4], bytes[5], bytes[6], bytes[7]]),
            raw_value: [bytes[8], bytes[9], bytes[10], bytes[11]],
            ifd,
        }
    }

    /// The field type, if supported.
    #[inline]
    pub fn field_type(&self) -> Option<FieldType> {
        FieldType::from_u16(self.field_type_raw)
    }

    /// On-disk payload size (`count * component width`).
    ///
    /// Returns `None` for unknown types or on overflow.
    pub fn value_byte_size(&self) -> Option<usize> {
        self.field_type()?.byte_size(self.count)
    }

    /// Whether the payload is stored inside `raw_value`.
    pub fn is_inline(&self) -> bool {
        self.field_type()
            .is_some_and(|field_type| field_type.fits_inline(self.count))
    }

    /// Interpret `raw_value` as an offset from the TIFF base.
    #[inline]
    pub fn value_offset(&self, byte_order: ByteOrder) -> u32 {
        byte_order.read_u32(self.raw_value)
    }

    /// Read an inline SHORT/LONG value as a u32.
    ///
    /// Used for pointer tags. Returns `None` for other types or counts.
    pub fn inline_u32(&self, byte_order: ByteOrder) -> Option<u32> {
        if self.count != 1 {
            return None;
        }

        match self.field_type()? {
            FieldType::Short => {
                Some(byte_order.read_u16([self.raw_value[0], self.raw_value[1]]) as u32)
            }
            FieldType::Long => Some(byte_order.read_u32(self.raw_value)),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
