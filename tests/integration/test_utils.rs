//! Test utilities for integration tests.
//!
//! Provides a builder for synthetic JPEG files carrying an EXIF block in
//! either byte order. Layout relative to the TIFF base:
//!
//! ```text
//! 0:      TIFF header (IFD0 at 8)
//! 8:      IFD0 (ExifOffset appended when EXIF entries exist)
//! ...     EXIF sub-IFD
//! ...     External value data
//! ```

#![allow(dead_code)]

use exif_extract::ByteOrder;

// =============================================================================
// Entries
// =============================================================================

/// Payload of a test entry, before layout.
#[derive(Debug, Clone)]
pub enum TestValue {
    /// Exactly 4 bytes placed in the value field as given
    Inline([u8; 4]),
    /// Bytes stored in the data area; the value field gets their offset
    External(Vec<u8>),
}

/// A directory entry to be laid out by [`ExifBuilder`].
#[derive(Debug, Clone)]
pub struct TestEntry {
    pub tag: u16,
    pub field_type: u16,
    pub count: u32,
    pub value: TestValue,
}

fn u16_bytes(order: ByteOrder, value: u16) -> [u8; 2] {
    match order {
        ByteOrder::LittleEndian => value.to_le_bytes(),
        ByteOrder::BigEndian => value.to_be_bytes(),
    }
}

fn u32_bytes(order: ByteOrder, value: u32) -> [u8; 4] {
    match order {
        ByteOrder::LittleEndian => value.to_le_bytes(),
        ByteOrder::BigEndian => value.to_be_bytes(),
    }
}

/// Pad bytes to 4 for inline storage.
fn inline(bytes: &[u8]) -> TestValue {
    let mut out = [0u8; 4];
    out[..bytes.len()].copy_from_slice(bytes);
    TestValue::Inline(out)
}

impl TestEntry {
    pub fn short(order: ByteOrder, tag: u16, value: u16) -> Self {
        Self {
            tag,
            field_type: 3,
            count: 1,
            value: inline(&u16_bytes(order, value)),
        }
    }

    pub fn long(order: ByteOrder, tag: u16, value: u32) -> Self {
        Self {
            tag,
            field_type: 4,
            count: 1,
            value: TestValue::Inline(u32_bytes(order, value)),
        }
    }

    pub fn slong(order: ByteOrder, tag: u16, value: i32) -> Self {
        Self {
            tag,
            field_type: 9,
            count: 1,
            value: TestValue::Inline(u32_bytes(order, value as u32)),
        }
    }

    pub fn rational(order: ByteOrder, tag: u16, numerator: u32, denominator: u32) -> Self {
        let mut bytes = u32_bytes(order, numerator).to_vec();
        bytes.extend_from_slice(&u32_bytes(order, denominator));
        Self {
            tag,
            field_type: 5,
            count: 1,
            value: TestValue::External(bytes),
        }
    }

    pub fn srational(order: ByteOrder, tag: u16, numerator: i32, denominator: i32) -> Self {
        let mut bytes = u32_bytes(order, numerator as u32).to_vec();
        bytes.extend_from_slice(&u32_bytes(order, denominator as u32));
        Self {
            tag,
            field_type: 10,
            count: 1,
            value: TestValue::External(bytes),
        }
    }

    /// NUL-terminated ASCII; inline when it fits.
    pub fn ascii(tag: u16, text: &str) -> Self {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        let count = bytes.len() as u32;
        let value = if bytes.len() <= 4 {
            inline(&bytes)
        } else {
            TestValue::External(bytes)
        };
        Self {
            tag,
            field_type: 2,
            count,
            value,
        }
    }

    pub fn bytes(tag: u16, data: &[u8]) -> Self {
        let value = if data.len() <= 4 {
            inline(data)
        } else {
            TestValue::External(data.to_vec())
        };
        Self {
            tag,
            field_type: 1,
            count: data.len() as u32,
            value,
        }
    }

    pub fn undefined(tag: u16, data: [u8; 4]) -> Self {
        Self {
            tag,
            field_type: 7,
            count: 4,
            value: TestValue::Inline(data),
        }
    }

    /// Raw entry, for malformed input.
    pub fn raw(tag: u16, field_type: u16, count: u32, value: [u8; 4]) -> Self {
        Self {
            tag,
            field_type,
            count,
            value: TestValue::Inline(value),
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

const ENTRY_SIZE: usize = 12;
const HEADER_SIZE: usize = 8;

/// JFIF APP0 segment as written by most encoders.
pub const JFIF_APP0: [u8; 18] = [
    0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00,
    0x01, 0x00, 0x00,
];

/// Builds a TIFF block and wraps it into a minimal JPEG.
#[derive(Debug, Clone)]
pub struct ExifBuilder {
    order: ByteOrder,
    ifd0: Vec<TestEntry>,
    exif: Vec<TestEntry>,
    with_app0: bool,
}

impl ExifBuilder {
    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            ifd0: Vec::new(),
            exif: Vec::new(),
            with_app0: true,
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn ifd0(mut self, entry: TestEntry) -> Self {
        self.ifd0.push(entry);
        self
    }

    pub fn exif(mut self, entry: TestEntry) -> Self {
        self.exif.push(entry);
        self
    }

    pub fn without_app0(mut self) -> Self {
        self.with_app0 = false;
        self
    }

    fn ifd_size(entries: usize) -> usize {
        2 + entries * ENTRY_SIZE + 4
    }

    /// The TIFF block alone, starting at the byte order mark.
    pub fn build_tiff(&self) -> Vec<u8> {
        let order = self.order;
        let has_exif = !self.exif.is_empty();
        let ifd0_entries = self.ifd0.len() + usize::from(has_exif);

        let exif_ifd_offset = HEADER_SIZE + Self::ifd_size(ifd0_entries);
        let exif_size = if has_exif {
            Self::ifd_size(self.exif.len())
        } else {
            0
        };
        let mut data_offset = exif_ifd_offset + exif_size;

        let mut ifd0 = self.ifd0.clone();
        if has_exif {
            ifd0.push(TestEntry::long(order, 0x8769, exif_ifd_offset as u32));
        }

        let mut out = match order {
            ByteOrder::LittleEndian => vec![b'I', b'I'],
            ByteOrder::BigEndian => vec![b'M', b'M'],
        };
        out.extend_from_slice(&u16_bytes(order, 42));
        out.extend_from_slice(&u32_bytes(order, HEADER_SIZE as u32));

        let mut data_area = Vec::new();
        let mut directories = vec![&ifd0];
        if has_exif {
            directories.push(&self.exif);
        }
        for entries in directories {
            out.extend_from_slice(&u16_bytes(order, entries.len() as u16));
            for entry in entries.iter() {
                out.extend_from_slice(&u16_bytes(order, entry.tag));
                out.extend_from_slice(&u16_bytes(order, entry.field_type));
                out.extend_from_slice(&u32_bytes(order, entry.count));
                match &entry.value {
                    TestValue::Inline(bytes) => out.extend_from_slice(bytes),
                    TestValue::External(bytes) => {
                        out.extend_from_slice(&u32_bytes(order, data_offset as u32));
                        data_area.extend_from_slice(bytes);
                        data_offset += bytes.len();
                    }
                }
            }
            out.extend_from_slice(&[0, 0, 0, 0]);
        }

        out.extend_from_slice(&data_area);
        out
    }

    /// A complete JPEG: SOI, optional APP0, APP1(Exif), a DQT stub, EOI.
    pub fn build(&self) -> Vec<u8> {
        wrap_tiff_in_jpeg(&self.build_tiff(), self.with_app0)
    }
}

/// Wrap a TIFF block in SOI + [APP0] + APP1("Exif\0\0") + DQT + EOI.
pub fn wrap_tiff_in_jpeg(tiff: &[u8], with_app0: bool) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    if with_app0 {
        out.extend_from_slice(&JFIF_APP0);
    }

    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((tiff.len() + 8) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);

    out.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x04, 0x00, 0x00]);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// A JPEG with only APP0 and no EXIF segment.
pub fn jpeg_without_exif() -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    out.extend_from_slice(&JFIF_APP0);
    out.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x04, 0x00, 0x00]);
    out.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0x12, 0x34]);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// Check that output is a flat `{"k":"v",...}` object without a trailing comma.
pub fn is_flat_quoted_object(json: &str) -> bool {
    let value: serde_json::Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(_) => return false,
    };
    let Some(map) = value.as_object() else {
        return false;
    };
    let Some(body) = json.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) else {
        return false;
    };
    !body.trim_end().ends_with(',') && map.values().all(|v| v.is_string())
}
