//! Pixel-format info block.

use iwi_common::BinaryReader;
use tracing::debug;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Format, Result};

/// Pixel-format metadata following the header.
///
/// The format code is kept as read; use [`IwiInfo::format`] to interpret it.
/// The dimensions are little-endian on disk and read in host order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct IwiInfo {
    /// Raw format code.
    pub format: u8,
    /// Usage flags.
    pub usage: u8,
    /// Width of the base level in texels.
    pub width: u16,
    /// Height of the base level in texels.
    pub height: u16,
    /// Depth for volume textures, normally 1.
    pub depth: u16,
}

impl IwiInfo {
    /// Size of the info block in bytes.
    pub const SIZE: usize = 8;

    /// Read the info block at the reader's current position.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let info: Self = reader.read_struct()?;

        if info.format().is_none() {
            debug!(code = info.format, "unknown IWI format code");
        }

        Ok(info)
    }

    /// Interpret the format code.
    pub fn format(&self) -> Option<Format> {
        Format::from_code(self.format)
    }
}
