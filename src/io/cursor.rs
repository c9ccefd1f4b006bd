use crate::error::IoError;
use crate::format::tiff::ByteOrder;

/// Bounds-checked reader over an immutable byte buffer.
///
/// Every read is positional and validated against the buffer length, so a
/// malformed offset surfaces as an [`IoError`] instead of a panic. The cursor
/// is `Copy`; it only borrows the caller's buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
}

impl<'a> ByteCursor<'a> {
    /// Wrap a buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], IoError> {
        let end = offset
            .checked_add(len)
            .ok_or(IoError::OffsetOverflow {
                base: offset,
                delta: len,
            })?;

        self.data
            .get(offset..end)
            .ok_or(IoError::RangeOutOfBounds {
                offset,
                requested: len,
                size: self.data.len(),
            })
    }

    /// Copy `N` bytes starting at `offset` into an array.
    pub fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N], IoError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.slice(offset, N)?);
        Ok(out)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&self, offset: usize) -> Result<u8, IoError> {
        Ok(self.array::<1>(offset)?[0])
    }

    /// Read a big-endian u16 (JPEG marker and length fields).
    #[inline]
    pub fn read_u16_be(&self, offset: usize) -> Result<u16, IoError> {
        self.array(offset).map(read_u16_be)
    }

    /// Read a u16 in the given byte order.
    #[inline]
    pub fn read_u16(&self, offset: usize, order: ByteOrder) -> Result<u16, IoError> {
        self.array(offset).map(|b| order.read_u16(b))
    }

    /// Read a u32 in the given byte order.
    #[inline]
    pub fn read_u32(&self, offset: usize, order: ByteOrder) -> Result<u32, IoError> {
        self.array(offset).map(|b| order.read_u32(b))
    }

    /// Read an i32 in the given byte order.
    #[inline]
    pub fn read_i32(&self, offset: usize, order: ByteOrder) -> Result<i32, IoError> {
        self.read_u32(offset, order).map(|v| v as i32)
    }
}

/// Add a relative offset to a base position, failing on overflow.
#[inline]
pub fn offset_from(base: usize, delta: usize) -> Result<usize, IoError> {
    base.checked_add(delta)
        .ok_or(IoError::OffsetOverflow { base, delta })
}

// =============================================================================
// Endian Helper Functions
// =============================================================================

#[inline]
pub fn read_u16_le(bytes: [u8; 2]) -> u16 {
    u16::from_le_bytes(bytes)
}

#[inline]
pub fn read_u16_be(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

#[inline]
pub fn read_u32_le(bytes: [u8; 4]) -> u32 {
    u32::from_le_bytes(bytes)
}

#[inline]
pub fn read_u32_be(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}
