//! IWI decoding.

use std::fs;
use std::path::Path;

use iwi_common::BinaryReader;
use tracing::{debug, trace, warn};

use crate::mipmap::{infer_mip_entries, select_largest};
use crate::{Error, Format, IwiHeader, IwiInfo, Layout, MipEntry, Result};

/// A decoded IWI file: header, info block and the largest mip level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iwi {
    header: IwiHeader,
    layout: Layout,
    info: IwiInfo,
    data: Vec<u8>,
}

/// The offset table of a decoded file and what was inferred from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipTable {
    /// Layout resolved from the version byte.
    pub layout: Layout,
    /// Position of the first table entry.
    pub table_start: usize,
    /// Position right after the table.
    pub table_end: usize,
    /// Offsets as stored in the file.
    pub raw_offsets: Vec<i32>,
    /// Inferred level ranges, in table order.
    pub entries: Vec<MipEntry>,
    /// Index into `entries` of the extracted level.
    pub selected: usize,
}

impl Iwi {
    /// Check if data starts with the IWI magic.
    pub fn is_iwi(data: &[u8]) -> bool {
        BinaryReader::new(data).expect_magic(IwiHeader::MAGIC).is_ok()
    }

    /// Read and decode an IWI file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Decode an IWI file from bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with_mips(data).map(|(image, _)| image)
    }

    /// Decode an IWI file, also returning the inferred mip table.
    pub fn parse_with_mips(data: &[u8]) -> Result<(Self, MipTable)> {
        let mut reader = BinaryReader::new(data);

        let header: IwiHeader = reader.read_struct()?;
        let layout = header.validate()?;
        debug!(version = header.version, %layout, "resolved IWI layout");

        if let Some(position) = layout.info_position() {
            reader.seek(position)?;
        }
        let info = IwiInfo::read(&mut reader)?;

        if let Some(position) = layout.table_position() {
            reader.seek(position)?;
        }
        let table_start = reader.position();
        let raw_offsets = reader.read_i32_vec(layout.offset_count())?;
        let table_end = reader.position();

        let entries = infer_mip_entries(&raw_offsets, table_end, data.len());
        for (index, entry) in entries.iter().enumerate() {
            trace!(index, offset = entry.offset, size = entry.size, "mip entry");
        }

        let (selected, mip) = select_largest(&entries).ok_or(Error::EmptyMipTable)?;
        let payload = mip.slice(data)?.to_vec();
        debug!(index = selected, offset = mip.offset, size = mip.size, "selected largest mip");

        if entries.iter().any(|e| e.size < 0) {
            warn!("offset table contains levels with negative sizes");
        }
        if let Some(format) = info.format() {
            let expected = format.level_size(u32::from(info.width), u32::from(info.height));
            if payload.len() != expected {
                debug!(expected, actual = payload.len(), %format, "payload size differs from base level size");
            }
        }

        let table = MipTable {
            layout,
            table_start,
            table_end,
            raw_offsets,
            entries,
            selected,
        };

        Ok((
            Self {
                header,
                layout,
                info,
                data: payload,
            },
            table,
        ))
    }

    /// Get the header.
    pub fn header(&self) -> &IwiHeader {
        &self.header
    }

    /// Get the info block.
    pub fn info(&self) -> &IwiInfo {
        &self.info
    }

    /// Get the largest mip level's bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the largest mip level's bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Layout the file was decoded with.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Interpret the info block's format code.
    pub fn format(&self) -> Option<Format> {
        self.info.format()
    }
}
