//! TIFF header parsing for embedded EXIF blocks.
//!
//! The EXIF payload of a JPEG APP1 segment is a classic TIFF stream. Its
//! first byte (the "II"/"MM" mark) is the TIFF base: every offset stored in
//! a directory entry is relative to it.
//!
//! # TIFF Header Structure
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Magic (42 = 0x002A)
//! Bytes 4-7: Offset to IFD0, relative to the TIFF base
//! ```

use crate::error::ExifError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, ByteCursor};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// TIFF magic number
const TIFF_MAGIC: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of an EXIF block.
///
/// Determined once from the header and shared by IFD0 and the EXIF sub-IFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Decode a u16 using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Decode a u32 using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Decode an i32 using this byte order.
    #[inline]
    pub fn read_i32(self, bytes: [u8; 4]) -> i32 {
        self.read_u32(bytes) as i32
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header of an EXIF block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the block
    pub byte_order: ByteOrder,

    /// Absolute position of the "II"/"MM" mark in the image buffer
    pub tiff_base: usize,

    /// Offset of IFD0, relative to `tiff_base`
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse the TIFF header located at `tiff_base` within `data`.
    ///
    /// # Errors
    /// - `EndianMissing` if the byte order mark is not II or MM
    /// - `TiffMissing` if the magic number is not 42
    /// - `TruncatedHeader` if the buffer ends inside the header
    pub fn parse(data: &[u8], tiff_base: usize) -> Result<Self, ExifError> {
        let cursor = ByteCursor::new(data);

        // Read as big-endian: we are matching a fixed byte pattern here
        let mark = cursor
            .read_u16_be(tiff_base)
            .map_err(|_| ExifError::EndianMissing(0))?;
        let byte_order = match mark {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(ExifError::EndianMissing(mark)),
        };

        let magic = cursor
            .read_u16(tiff_base + 2, byte_order)
            .map_err(|_| ExifError::TiffMissing(0))?;
        if magic != TIFF_MAGIC {
            return Err(ExifError::TiffMissing(magic));
        }

        let first_ifd_offset = cursor
            .read_u32(tiff_base + 4, byte_order)
            .map_err(|_| ExifError::TruncatedHeader)?;

        Ok(TiffHeader {
            byte_order,
            tiff_base,
            first_ifd_offset,
        })
    }

    /// Absolute position of IFD0 in the image buffer.
    #[inline]
    pub fn first_ifd_position(&self) -> Option<usize> {
        self.tiff_base.checked_add(self.first_ifd_offset as usize)
    }
}

// =============================================================================
// Tests
// =============================================================================
