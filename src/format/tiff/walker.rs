//! Directory walking over IFD0 and the EXIF sub-IFD.
//!
//! The walk is a single lazy iterator built from two bounded runs: the
//! entries of IFD0, then the entries of the EXIF sub-IFD if IFD0 carried an
//! ExifOffset pointer. Each run's entry count is read exactly once, so the
//! total work is bounded by `count(IFD0) + count(EXIF)` no matter how the
//! pointers are arranged.

use tracing::{debug, warn};

use crate::error::ExifError;
use crate::io::{offset_from, ByteCursor};

use super::entry::{DirectoryEntry, IfdKind, IFD_COUNT_SIZE, IFD_ENTRY_SIZE};
use super::header::TiffHeader;
use super::tags::ExifTag;

// =============================================================================
// Directory
// =============================================================================

/// An opened EXIF directory: validated header plus the IFD0 entry count.
#[derive(Debug, Clone, Copy)]
pub struct Directory<'a> {
    cursor: ByteCursor<'a>,
    header: TiffHeader,
    ifd0_position: usize,
    ifd0_count: u16,
}

impl<'a> Directory<'a> {
    /// Validate the TIFF header at `payload_offset` and locate IFD0.
    ///
    /// # Errors
    /// - `EndianMissing` / `TiffMissing` / `TruncatedHeader` from the header
    /// - `InvalidIfdOffset` if IFD0's entry count cannot be read
    pub fn open(data: &'a [u8], payload_offset: usize) -> Result<Self, ExifError> {
        let header = TiffHeader::parse(data, payload_offset)?;
        let cursor = ByteCursor::new(data);

        let ifd0_count = header
            .first_ifd_position()
            .and_then(|position| {
                cursor
                    .read_u16(position, header.byte_order)
                    .ok()
                    .map(|count| (position, count))
            });

        let Some((ifd0_position, ifd0_count)) = ifd0_count else {
            return Err(ExifError::InvalidIfdOffset(header.first_ifd_offset));
        };

        debug!(
            byte_order = ?header.byte_order,
            tiff_base = header.tiff_base,
            entries = ifd0_count,
            "Opened EXIF directory"
        );

        Ok(Directory {
            cursor,
            header,
            ifd0_position,
            ifd0_count,
        })
    }

    /// The validated TIFF header.
    #[inline]
    pub fn header(&self) -> &TiffHeader {
        &self.header
    }

    /// Number of entries declared by IFD0.
    #[inline]
    pub fn ifd0_entry_count(&self) -> u16 {
        self.ifd0_count
    }

    /// Iterate entries of IFD0 followed by the EXIF sub-IFD.
    ///
    /// Single pass: re-open the directory to walk it again.
    pub fn entries(self) -> DirectoryEntries<'a> {
        DirectoryEntries {
            cursor: self.cursor,
            header: self.header,
            run: Some(IfdRun {
                kind: IfdKind::Ifd0,
                position: self.ifd0_position + IFD_COUNT_SIZE,
                remaining: self.ifd0_count,
            }),
            exif_offset: None,
            exif_seen: false,
        }
    }
}

// =============================================================================
// DirectoryEntries
// =============================================================================

/// A bounded run of entries within one directory.
#[derive(Debug, Clone, Copy)]
struct IfdRun {
    kind: IfdKind,
    position: usize,
    remaining: u16,
}

/// Lazy iterator over IFD0 entries, then EXIF sub-IFD entries.
///
/// The ExifOffset pointer entry is consumed here and never yielded. Only the
/// first ExifOffset in IFD0 is honored; any later one, or one inside the
/// EXIF sub-IFD, is ignored.
#[derive(Debug)]
pub struct DirectoryEntries<'a> {
    cursor: ByteCursor<'a>,
    header: TiffHeader,
    run: Option<IfdRun>,
    exif_offset: Option<u32>,
    exif_seen: bool,
}

impl DirectoryEntries<'_> {
    /// Start the EXIF sub-IFD run, if a pointer was recorded.
    fn enter_exif(&mut self) -> Option<IfdRun> {
        let offset = self.exif_offset.take()?;

        let run = offset_from(self.header.tiff_base, offset as usize)
            .ok()
            .and_then(|position| {
                let count = self.cursor.read_u16(position, self.header.byte_order).ok()?;
                Some(IfdRun {
                    kind: IfdKind::Exif,
                    position: position + IFD_COUNT_SIZE,
                    remaining: count,
                })
            });

        match run {
            Some(run) => {
                debug!(offset, entries = run.remaining, "Entering EXIF sub-IFD");
                Some(run)
            }
            None => {
                warn!(offset, "EXIF sub-IFD offset out of bounds, skipping");
                None
            }
        }
    }

    /// Record an ExifOffset pointer found in IFD0.
    fn note_exif_pointer(&mut self, entry: &DirectoryEntry) {
        if entry.ifd != IfdKind::Ifd0 || self.exif_seen {
            debug!(ifd = entry.ifd.name(), "Ignoring repeated ExifOffset");
            return;
        }
        self.exif_seen = true;

        match entry.inline_u32(self.header.byte_order) {
            Some(offset) => self.exif_offset = Some(offset),
            None => warn!(
                field_type = entry.field_type_raw,
                count = entry.count,
                "Malformed ExifOffset entry"
            ),
        }
    }
}

impl Iterator for DirectoryEntries<'_> {
    type Item = DirectoryEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let run = self.run.as_mut()?;

            if run.remaining == 0 {
                let kind = run.kind;
                self.run = match kind {
                    IfdKind::Ifd0 => self.enter_exif(),
                    IfdKind::Exif => None,
                };
                continue;
            }

            let kind = run.kind;
            let bytes = match self.cursor.array::<IFD_ENTRY_SIZE>(run.position) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(ifd = kind.name(), error = %e, "Directory truncated");
                    run.remaining = 0;
                    continue;
                }
            };
            run.position += IFD_ENTRY_SIZE;
            run.remaining -= 1;

            let entry = DirectoryEntry::parse(bytes, self.header.byte_order, kind);
            if entry.tag == ExifTag::ExifOffset.as_u16() {
                self.note_exif_pointer(&entry);
                continue;
            }

            return Some(entry);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
