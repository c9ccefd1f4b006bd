//! TIFF directory decoding for EXIF blocks.
//!
//! The EXIF payload of a JPEG is a small TIFF stream: a header, IFD0, and an
//! optional EXIF sub-IFD reached through the ExifOffset tag.
//!
//! # Key Concepts
//!
//! - **Byte order**: the header declares its endianness (II = little-endian,
//!   MM = big-endian). Both directories share it.
//!
//! - **TIFF base**: every offset in a directory entry is relative to the
//!   header's first byte, not to the start of the JPEG.
//!
//! - **Inline vs offset values**: payloads of up to 4 bytes live in the
//!   entry itself; larger ones are stored at an offset from the TIFF base.

mod entry;
mod header;
mod tags;
mod values;
mod walker;

pub use entry::{DirectoryEntry, IfdKind, IFD_COUNT_SIZE, IFD_ENTRY_SIZE};
pub use header::{ByteOrder, TiffHeader, TIFF_HEADER_SIZE};
pub use tags::{tag_name, ExifTag, FieldType, UNKNOWN_TAG_NAME};
pub use values::{
    color_space_label, file_source_label, scene_type_label, FieldDecoder, ResolvedValue,
};
pub use walker::{Directory, DirectoryEntries};
