//! Synthetic IWI files for tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::Level;

use crate::{IwiHeader, IwiInfo, Layout};

/// Builds well-formed IWI files.
///
/// Mips are added smallest first and laid out in that order after the offset
/// table. The table follows the shipped files: entry 0 holds the file size,
/// then level starts from largest down, with the last start repeated so the
/// inferred sizes tile the payload region exactly.
pub(crate) struct IwiBuilder {
    magic: [u8; 3],
    version: u8,
    layout: Layout,
    info: IwiInfo,
    mips: Vec<Vec<u8>>,
    gap_fill: u8,
}

impl IwiBuilder {
    pub fn new(version: u8) -> Self {
        let layout = Layout::from_version(version)
            .unwrap_or_else(|| panic!("no layout for version {version:#04x}, use with_layout"));
        Self::with_layout(version, layout)
    }

    /// A builder that writes `version` but lays the file out as `layout`.
    pub fn with_layout(version: u8, layout: Layout) -> Self {
        Self {
            magic: *IwiHeader::MAGIC,
            version,
            layout,
            info: IwiInfo {
                format: 0x0B,
                usage: 0,
                width: 64,
                height: 64,
                depth: 1,
            },
            mips: Vec::new(),
            gap_fill: 0,
        }
    }

    pub fn magic(mut self, magic: [u8; 3]) -> Self {
        self.magic = magic;
        self
    }

    pub fn info(mut self, info: IwiInfo) -> Self {
        self.info = info;
        self
    }

    pub fn mip(mut self, payload: Vec<u8>) -> Self {
        self.mips.push(payload);
        self
    }

    /// Byte used for the gaps skipped by the layout's seeks.
    pub fn gap_fill(mut self, fill: u8) -> Self {
        self.gap_fill = fill;
        self
    }

    /// Position of the first offset table entry.
    pub fn table_start(&self) -> usize {
        let layout = self.layout;
        layout
            .table_position()
            .unwrap_or(layout.info_position().unwrap_or(IwiHeader::SIZE) + IwiInfo::SIZE)
    }

    pub fn build(&self) -> Vec<u8> {
        let layout = self.layout;
        let count = layout.offset_count();
        assert!(!self.mips.is_empty() && self.mips.len() < count, "unsupported mip count");

        let mut out = Vec::new();
        out.extend_from_slice(&self.magic);
        out.push(self.version);

        if let Some(position) = layout.info_position() {
            out.resize(position, self.gap_fill);
        }
        out.write_u8(self.info.format).unwrap();
        out.write_u8(self.info.usage).unwrap();
        out.write_u16::<LittleEndian>(self.info.width).unwrap();
        out.write_u16::<LittleEndian>(self.info.height).unwrap();
        out.write_u16::<LittleEndian>(self.info.depth).unwrap();

        if let Some(position) = layout.table_position() {
            out.resize(position, self.gap_fill);
        }

        let mut starts = Vec::with_capacity(self.mips.len() + 1);
        let mut position = out.len() + count * 4;
        for mip in &self.mips {
            starts.push(position as i32);
            position += mip.len();
        }
        starts.push(position as i32);

        let levels = self.mips.len();
        for i in 0..count {
            let index = if i == 0 { levels } else { levels.saturating_sub(i).max(1) };
            out.write_i32::<LittleEndian>(starts[index]).unwrap();
        }

        for mip in &self.mips {
            out.extend_from_slice(mip);
        }
        out
    }
}

/// A payload of `len` bytes that differs from other payloads with another
/// `seed`.
pub(crate) fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a subscriber that records events up to `level`, returning
/// the formatted output.
pub(crate) fn capture_logs(level: Level, f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
