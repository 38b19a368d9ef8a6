//! Pixel formats named by the info block.

use std::fmt;

/// Pixel encoding of the mip payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Format {
    Argb32 = 0x01,
    Rgb24 = 0x02,
    Ga16 = 0x03,
    A8 = 0x04,
    Dxt1 = 0x0B,
    Dxt3 = 0x0C,
    Dxt5 = 0x0D,
}

impl Format {
    /// Look up a format code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Format::Argb32),
            0x02 => Some(Format::Rgb24),
            0x03 => Some(Format::Ga16),
            0x04 => Some(Format::A8),
            0x0B => Some(Format::Dxt1),
            0x0C => Some(Format::Dxt3),
            0x0D => Some(Format::Dxt5),
            _ => None,
        }
    }

    /// The raw format code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Format::Argb32 => "ARGB32",
            Format::Rgb24 => "RGB24",
            Format::Ga16 => "GA16",
            Format::A8 => "A8",
            Format::Dxt1 => "DXT1",
            Format::Dxt3 => "DXT3",
            Format::Dxt5 => "DXT5",
        }
    }

    /// Check if this is a block-compressed format.
    pub const fn is_compressed(self) -> bool {
        matches!(self, Format::Dxt1 | Format::Dxt3 | Format::Dxt5)
    }

    /// Bytes per 4x4 block for compressed formats, bytes per pixel otherwise.
    pub const fn block_size(self) -> usize {
        match self {
            Format::Dxt1 => 8,
            Format::Dxt3 | Format::Dxt5 => 16,
            Format::Argb32 => 4,
            Format::Rgb24 => 3,
            Format::Ga16 => 2,
            Format::A8 => 1,
        }
    }

    /// Expected size in bytes of one mip level with the given dimensions.
    pub fn level_size(self, width: u32, height: u32) -> usize {
        if self.is_compressed() {
            let blocks_x = (width as usize).div_ceil(4);
            let blocks_y = (height as usize).div_ceil(4);
            blocks_x.max(1) * blocks_y.max(1) * self.block_size()
        } else {
            width as usize * height as usize * self.block_size()
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
