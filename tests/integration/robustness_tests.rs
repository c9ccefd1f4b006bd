//! Property-style tests: byte-order symmetry, determinism, and bounds safety
//! on truncated and corrupted input.

use exif_extract::{parse_jpeg, parse_jpeg_to_json, ByteOrder, ExifError, DEFAULT_OUTPUT_CAPACITY};

use super::test_utils::{is_flat_quoted_object, wrap_tiff_in_jpeg, ExifBuilder, TestEntry};

/// One entry of every decodable type, in both directories.
fn every_type(order: ByteOrder) -> ExifBuilder {
    ExifBuilder::new(order)
        .ifd0(TestEntry::ascii(0x010F, "Fujifilm"))
        .ifd0(TestEntry::ascii(0x0131, "v1"))
        .ifd0(TestEntry::short(order, 0x0112, 8))
        .ifd0(TestEntry::rational(order, 0x011A, 300, 1))
        .ifd0(TestEntry::bytes(0x013E, &[0xDE, 0xAD, 0xBE, 0xEF, 0x42]))
        .exif(TestEntry::long(order, 0xA002, 6000))
        .exif(TestEntry::slong(order, 0x9203, -123_456))
        .exif(TestEntry::srational(order, 0x9204, -1, 3))
        .exif(TestEntry::short(order, 0xA001, 0xFFFE))
        .exif(TestEntry::undefined(0x9000, *b"0231"))
        .exif(TestEntry::undefined(0x9101, [4, 5, 6, 0]))
        .exif(TestEntry::undefined(0xA300, [1, 0, 0, 0]))
}

/// Deterministic xorshift generator for corruption tests.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

// =============================================================================
// Symmetry and Determinism
// =============================================================================

#[test]
fn test_byte_order_symmetry() {
    let little = parse_jpeg_to_json(&every_type(ByteOrder::LittleEndian).build(), 4096).unwrap();
    let big = parse_jpeg_to_json(&every_type(ByteOrder::BigEndian).build(), 4096).unwrap();

    assert_eq!(little, big);
    assert!(little.contains(r#""ColorSpace":"ICC Profile""#));
    assert!(little.contains(r#""ComponentsConfiguration":"RGB-""#));
    assert!(little.contains(r#""BrightnessValue":"-123456""#));
    assert!(little.contains(r#""WhitePoint":"0xDE,0xAD,0xBE,0xEF,0x42""#));
}

#[test]
fn test_decoding_is_deterministic() {
    let data = every_type(ByteOrder::BigEndian).build();
    let first = parse_jpeg_to_json(&data, DEFAULT_OUTPUT_CAPACITY).unwrap();

    for _ in 0..5 {
        assert_eq!(
            parse_jpeg_to_json(&data, DEFAULT_OUTPUT_CAPACITY).unwrap(),
            first
        );
    }
}

#[test]
fn test_concurrent_decoding() {
    let data = every_type(ByteOrder::LittleEndian).build();
    let expected = parse_jpeg_to_json(&data, DEFAULT_OUTPUT_CAPACITY).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| parse_jpeg_to_json(&data, DEFAULT_OUTPUT_CAPACITY)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    });
}

#[test]
fn test_output_shape() {
    for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        let json = parse_jpeg_to_json(&every_type(order).build(), 4096).unwrap();
        assert!(is_flat_quoted_object(&json), "bad shape: {}", json);
    }
}

// =============================================================================
// ExifOffset Pointer
// =============================================================================

#[test]
fn test_exif_offset_never_emitted() {
    for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        let json = parse_jpeg_to_json(&every_type(order).build(), 4096).unwrap();
        assert!(!json.contains("ExifOffset"));
    }
}

#[test]
fn test_self_referencing_exif_offset_terminates() {
    // IFD0 at 8 holding only an ExifOffset that points back at IFD0
    let mut tiff = vec![b'I', b'I', 42, 0, 8, 0, 0, 0];
    tiff.extend_from_slice(&2u16.to_le_bytes());
    tiff.extend_from_slice(&[0x69, 0x87, 4, 0, 1, 0, 0, 0, 8, 0, 0, 0]);
    tiff.extend_from_slice(&[0x12, 0x01, 3, 0, 1, 0, 0, 0, 1, 0, 0, 0]);
    tiff.extend_from_slice(&[0, 0, 0, 0]);

    let fields = parse_jpeg(&wrap_tiff_in_jpeg(&tiff, false)).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields.get("Orientation"), Some("1"));
}

#[test]
fn test_exif_offset_out_of_bounds() {
    let order = ByteOrder::BigEndian;
    let data = ExifBuilder::new(order)
        .ifd0(TestEntry::short(order, 0x0112, 5))
        .ifd0(TestEntry::long(order, 0x8769, 0x00FF_FFFF))
        .build();

    let fields = parse_jpeg(&data).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields.get("Orientation"), Some("5"));
}

// =============================================================================
// Bounds Safety
// =============================================================================

#[test]
fn test_truncation_at_every_length() {
    for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        let data = every_type(order).build();
        let full = parse_jpeg(&data).unwrap();

        for len in 0..data.len() {
            match parse_jpeg(&data[..len]) {
                Ok(fields) => {
                    assert!(fields.len() <= full.len());
                    for field in fields.iter() {
                        assert_eq!(full.get(field.name), Some(field.value.as_str()));
                    }
                }
                Err(e) => assert!(
                    matches!(
                        e,
                        ExifError::ExifMissing
                            | ExifError::EndianMissing(_)
                            | ExifError::TiffMissing(_)
                            | ExifError::TruncatedHeader
                            | ExifError::InvalidIfdOffset(_)
                    ),
                    "unexpected error at length {}: {:?}",
                    len,
                    e
                ),
            }
        }
    }
}

#[test]
fn test_random_corruption_never_panics() {
    let original = every_type(ByteOrder::LittleEndian).build();
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);

    for _ in 0..2000 {
        let mut data = original.clone();
        for _ in 0..1 + rng.below(8) {
            let index = rng.below(data.len());
            data[index] = rng.next() as u8;
        }
        let len = rng.below(data.len() + 1);

        if let Ok(fields) = parse_jpeg(&data[..len]) {
            let json = fields.finalize(DEFAULT_OUTPUT_CAPACITY).unwrap();
            assert!(is_flat_quoted_object(&json), "bad shape: {}", json);
        }
    }
}

#[test]
fn test_hostile_counts_and_offsets() {
    let order = ByteOrder::LittleEndian;
    let data = ExifBuilder::new(order)
        .ifd0(TestEntry::raw(0x010F, 2, u32::MAX, [0xF0, 0xFF, 0xFF, 0xFF]))
        .ifd0(TestEntry::raw(0x013E, 1, 0x4000_0000, [0, 0, 0, 0]))
        .ifd0(TestEntry::raw(0x011A, 5, 1, [0xFC, 0xFF, 0xFF, 0xFF]))
        .ifd0(TestEntry::short(order, 0x0112, 2))
        .build();

    let fields = parse_jpeg(&data).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields.get("Orientation"), Some("2"));
}

#[test]
fn test_inflated_directory_count() {
    let mut tiff = ExifBuilder::new(ByteOrder::BigEndian)
        .ifd0(TestEntry::short(ByteOrder::BigEndian, 0x0112, 4))
        .build_tiff();
    // Claim far more entries than the segment holds
    tiff[8] = 0xFF;
    tiff[9] = 0xFF;

    let fields = parse_jpeg(&wrap_tiff_in_jpeg(&tiff, true)).unwrap();
    assert_eq!(fields.get("Orientation"), Some("4"));
}
