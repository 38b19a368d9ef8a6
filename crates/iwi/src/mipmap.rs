//! Mip level size inference and selection.
//!
//! The offset table only stores where levels begin. Each level's size is the
//! distance to the next known boundary:
//!
//! - entry `0` runs from its offset to the end of the file,
//! - the last entry starts right after the table and ends at its offset,
//! - every other entry ends where the previous entry starts.

use crate::{Error, Result};

/// A mip level's byte range, as inferred from the offset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipEntry {
    /// Absolute file offset of the level.
    pub offset: i32,
    /// Size of the level in bytes. Negative for corrupt tables.
    pub size: i32,
}

impl MipEntry {
    /// Borrow this level's bytes from the whole file.
    ///
    /// Fails instead of returning a shorter slice when the range runs past
    /// the end of `data`.
    pub fn slice<'a>(&self, data: &'a [u8]) -> Result<&'a [u8]> {
        let (Ok(offset), Ok(size)) = (usize::try_from(self.offset), usize::try_from(self.size)) else {
            return Err(Error::InvalidMipRange {
                offset: self.offset,
                size: self.size,
            });
        };

        let available = data.len().saturating_sub(offset);
        if offset > data.len() || size > available {
            return Err(Error::Truncated {
                offset,
                needed: size,
                available,
            });
        }

        Ok(&data[offset..offset + size])
    }
}

/// Infer `(offset, size)` pairs from a raw offset table.
///
/// `table_end` is the file position right after the table and `file_len` the
/// total input length. Sizes that do not fit in an `i32` come out as
/// `i32::MIN` so they can never win selection. A single-entry table takes the
/// entry-0 rule and runs to the end of the file.
pub fn infer_mip_entries(offsets: &[i32], table_end: usize, file_len: usize) -> Vec<MipEntry> {
    let table_end = i64::try_from(table_end).unwrap_or(i64::MAX);
    let file_len = i64::try_from(file_len).unwrap_or(i64::MAX);
    let last = offsets.len().saturating_sub(1);

    offsets
        .iter()
        .enumerate()
        .map(|(i, &raw)| {
            let (offset, size) = match i {
                0 => (i64::from(raw), file_len - i64::from(raw)),
                i if i == last => (table_end, i64::from(raw) - table_end),
                i => (i64::from(raw), i64::from(offsets[i - 1]) - i64::from(raw)),
            };
            MipEntry {
                offset: narrow(offset),
                size: narrow(size),
            }
        })
        .collect()
}

fn narrow(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MIN)
}

/// Order entries by size, largest first, keeping table order among equal
/// sizes. Each entry is paired with its table index.
pub fn sort_by_size(entries: &[MipEntry]) -> Vec<(usize, MipEntry)> {
    let mut sorted: Vec<_> = entries.iter().copied().enumerate().collect();
    sorted.sort_by(|a, b| b.1.size.cmp(&a.1.size));
    sorted
}

/// Pick the largest entry; ties go to the earliest table index.
pub fn select_largest(entries: &[MipEntry]) -> Option<(usize, MipEntry)> {
    sort_by_size(entries).into_iter().next()
}
