//! Directory entry value decoding.
//!
//! Values are stored either inline in the entry's 4-byte value field (when
//! `count * component width <= 4`) or at an offset from the TIFF base. The
//! inline-vs-offset decision is made in one place, [`FieldDecoder::payload`],
//! and every type rule works on the resolved byte slice.

use std::fmt;

use crate::error::FieldError;
use crate::io::{offset_from, ByteCursor};

use super::entry::DirectoryEntry;
use super::header::{ByteOrder, TiffHeader};
use super::tags::{ExifTag, FieldType};

// =============================================================================
// ResolvedValue
// =============================================================================

/// A decoded entry value, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    /// BYTE data, rendered as comma-separated `0xHH` tokens
    Bytes(Vec<u8>),

    /// ASCII text, or a version string
    Text(String),

    /// SHORT or LONG
    Unsigned(u32),

    /// SLONG
    Signed(i32),

    /// RATIONAL as (numerator, denominator)
    Rational(u32, u32),

    /// SRATIONAL as (numerator, denominator)
    SignedRational(i32, i32),

    /// Enumerated value with a fixed rendering
    Label(&'static str),
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Bytes(bytes) => {
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "0x{:02X}", byte)?;
                }
                Ok(())
            }
            ResolvedValue::Text(text) => f.write_str(text),
            ResolvedValue::Unsigned(value) => write!(f, "{}", value),
            ResolvedValue::Signed(value) => write!(f, "{}", value),
            ResolvedValue::Rational(num, den) => write!(f, "{}/{}", num, den),
            ResolvedValue::SignedRational(num, den) => write!(f, "{}/{}", num, den),
            ResolvedValue::Label(label) => f.write_str(label),
        }
    }
}

// =============================================================================
// Enumerations
// =============================================================================

/// ColorSpace (0xA001) rendering.
pub fn color_space_label(value: u16) -> &'static str {
    match value {
        0x0001 => "sRGB",
        0x0002 => "Adobe RGB",
        0xFFFD => "Wide Gamut RGB",
        0xFFFE => "ICC Profile",
        0xFFFF => "Uncalibrated",
        _ => "Unknown",
    }
}

/// FileSource (0xA300) rendering.
pub fn file_source_label(value: u8) -> &'static str {
    match value {
        1 => "Film Scanner",
        2 => "Reflection Print Scanner",
        3 => "Digital Camera",
        _ => "Unknown",
    }
}

/// SceneType (0xA301) rendering.
pub fn scene_type_label(value: u8) -> &'static str {
    match value {
        1 => "Directly Photographed",
        _ => "Unknown",
    }
}

/// ComponentsConfiguration (0x9101) channel name.
fn component_label(value: u8) -> &'static str {
    match value {
        0 => "-",
        1 => "Y",
        2 => "Cb",
        3 => "Cr",
        4 => "R",
        5 => "G",
        6 => "B",
        _ => "?",
    }
}

/// Printable ASCII, with `.` standing in for anything else.
#[inline]
fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '.'
    }
}

// =============================================================================
// FieldDecoder
// =============================================================================

/// Decodes directory entries against the image buffer.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecoder<'a> {
    cursor: ByteCursor<'a>,
    tiff_base: usize,
    byte_order: ByteOrder,
}

impl<'a> FieldDecoder<'a> {
    /// Create a decoder for the EXIF block described by `header`.
    pub fn new(data: &'a [u8], header: &TiffHeader) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            tiff_base: header.tiff_base,
            byte_order: header.byte_order,
        }
    }

    /// Resolve an entry's payload bytes.
    ///
    /// Returns the first `count * width` bytes of the value field when the
    /// payload fits inline, otherwise the bounds-checked external range at
    /// `tiff_base + offset`.
    pub fn payload<'s>(&'s self, entry: &'s DirectoryEntry) -> Result<&'s [u8], FieldError> {
        let size = entry
            .value_byte_size()
            .ok_or(FieldError::UnknownFieldType(entry.field_type_raw))?;

        if size <= FieldType::INLINE_THRESHOLD {
            return Ok(&entry.raw_value[..size]);
        }

        let offset = entry.value_offset(self.byte_order) as usize;
        let start = offset_from(self.tiff_base, offset)?;
        Ok(self.cursor.slice(start, size)?)
    }

    /// Decode an entry into a typed value.
    pub fn decode(&self, entry: &DirectoryEntry) -> Result<ResolvedValue, FieldError> {
        let field_type = entry
            .field_type()
            .ok_or(FieldError::UnknownFieldType(entry.field_type_raw))?;

        match field_type {
            FieldType::Byte => Ok(ResolvedValue::Bytes(self.payload(entry)?.to_vec())),
            FieldType::Ascii => self.decode_ascii(entry),
            FieldType::Short => self.decode_short(entry),
            FieldType::Long => {
                if entry.count != 1 {
                    return Err(FieldError::LongCount(entry.count));
                }
                Ok(ResolvedValue::Unsigned(self.byte_order.read_u32(entry.raw_value)))
            }
            FieldType::SLong => {
                if entry.count != 1 {
                    return Err(FieldError::LongCount(entry.count));
                }
                Ok(ResolvedValue::Signed(self.byte_order.read_i32(entry.raw_value)))
            }
            FieldType::Rational | FieldType::SRational => self.decode_rational(entry, field_type),
            FieldType::Undefined => self.decode_undefined(entry),
        }
    }

    fn decode_ascii(&self, entry: &DirectoryEntry) -> Result<ResolvedValue, FieldError> {
        let bytes = self.payload(entry)?;
        let text = bytes
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| printable(b))
            .collect();
        Ok(ResolvedValue::Text(text))
    }

    fn decode_short(&self, entry: &DirectoryEntry) -> Result<ResolvedValue, FieldError> {
        if entry.count != 1 {
            return Err(FieldError::ShortCount(entry.count));
        }

        let value = self
            .byte_order
            .read_u16([entry.raw_value[0], entry.raw_value[1]]);

        if entry.tag == ExifTag::ColorSpace.as_u16() {
            Ok(ResolvedValue::Label(color_space_label(value)))
        } else {
            Ok(ResolvedValue::Unsigned(value as u32))
        }
    }

    fn decode_rational(
        &self,
        entry: &DirectoryEntry,
        field_type: FieldType,
    ) -> Result<ResolvedValue, FieldError> {
        if entry.count != 1 {
            return Err(FieldError::RationalCount(entry.count));
        }

        let bytes = self.payload(entry)?;
        let numerator = self.byte_order.read_u32([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let denominator = self.byte_order.read_u32([bytes[4], bytes[5], bytes[6], bytes[7]]);

        Ok(match field_type {
            FieldType::SRational => {
                ResolvedValue::SignedRational(numerator as i32, denominator as i32)
            }
            _ => ResolvedValue::Rational(numerator, denominator),
        })
    }

    fn decode_undefined(&self, entry: &DirectoryEntry) -> Result<ResolvedValue, FieldError> {
        let unknown = FieldError::UnknownUndefined {
            tag: entry.tag,
            count: entry.count,
        };
        let raw = entry.raw_value;

        match ExifTag::from_u16(entry.tag) {
            Some(ExifTag::ExifVersion | ExifTag::FlashpixVersion) => {
                if entry.count > 4 {
                    return Err(unknown);
                }
                let text = [
                    printable(raw[0]),
                    printable(raw[1]),
                    '.',
                    printable(raw[2]),
                    printable(raw[3]),
                ]
                .iter()
                .collect();
                Ok(ResolvedValue::Text(text))
            }
            Some(ExifTag::ComponentsConfiguration) => {
                if entry.count > 4 {
                    return Err(unknown);
                }
                let text = raw.iter().map(|&b| component_label(b)).collect();
                Ok(ResolvedValue::Text(text))
            }
            Some(ExifTag::FileSource) => Ok(ResolvedValue::Label(file_source_label(raw[0]))),
            Some(ExifTag::SceneType) => Ok(ResolvedValue::Label(scene_type_label(raw[0]))),
            _ => Err(unknown),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
