//! DDS container for extracted mip payloads.
//!
//! The payload is copied as-is behind a DDS header describing the IWI format;
//! no pixel conversion takes place.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Format, Iwi, IwiInfo, Result};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

const DDSD_CAPS: u32 = 0x1;
const DDSD_HEIGHT: u32 = 0x2;
const DDSD_WIDTH: u32 = 0x4;
const DDSD_PITCH: u32 = 0x8;
const DDSD_PIXELFORMAT: u32 = 0x1000;
const DDSD_LINEARSIZE: u32 = 0x80000;

const DDPF_ALPHAPIXELS: u32 = 0x1;
const DDPF_ALPHA: u32 = 0x2;
const DDPF_FOURCC: u32 = 0x4;
const DDPF_RGB: u32 = 0x40;
const DDPF_LUMINANCE: u32 = 0x20000;

const DDSCAPS_TEXTURE: u32 = 0x1000;

/// DDS file header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// Describe a single-level image with the given info block.
    ///
    /// `payload_len` is stored as the linear size of compressed formats.
    pub fn for_info(info: &IwiInfo, payload_len: usize) -> Result<Self> {
        let format = info.format().ok_or(Error::UnsupportedDdsFormat(info.format))?;
        let width = u32::from(info.width);
        let height = u32::from(info.height);

        let mut flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT;
        let pitch_or_linear_size = if format.is_compressed() {
            flags |= DDSD_LINEARSIZE;
            u32::try_from(payload_len).unwrap_or(u32::MAX)
        } else {
            flags |= DDSD_PITCH;
            width * format.block_size() as u32
        };

        Ok(Self {
            size: Self::SIZE,
            flags,
            height,
            width,
            pitch_or_linear_size,
            depth: 0,
            mipmap_count: 0,
            reserved1: [0; 11],
            pixel_format: DdsPixelFormat::for_format(format),
            caps: DDSCAPS_TEXTURE,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        })
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Expected structure size.
    pub const SIZE: u32 = 32;

    fn masks(flags: u32, bits: u32, rgba: [u32; 4]) -> Self {
        Self {
            size: Self::SIZE,
            flags,
            four_cc: FourCC::NONE,
            rgb_bit_count: bits,
            r_bit_mask: rgba[0],
            g_bit_mask: rgba[1],
            b_bit_mask: rgba[2],
            a_bit_mask: rgba[3],
        }
    }

    /// Pixel format matching an IWI format.
    pub fn for_format(format: Format) -> Self {
        match format {
            Format::Dxt1 | Format::Dxt3 | Format::Dxt5 => Self {
                four_cc: FourCC::for_format(format),
                ..Self::masks(DDPF_FOURCC, 0, [0; 4])
            },
            Format::Argb32 => Self::masks(
                DDPF_RGB | DDPF_ALPHAPIXELS,
                32,
                [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000],
            ),
            Format::Rgb24 => Self::masks(DDPF_RGB, 24, [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0]),
            Format::Ga16 => Self::masks(DDPF_LUMINANCE | DDPF_ALPHAPIXELS, 16, [0x00FF, 0, 0, 0xFF00]),
            Format::A8 => Self::masks(DDPF_ALPHA, 8, [0, 0, 0, 0xFF]),
        }
    }
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// No compression.
    pub const NONE: Self = Self([0; 4]);
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");

    fn for_format(format: Format) -> Self {
        match format {
            Format::Dxt1 => Self::DXT1,
            Format::Dxt3 => Self::DXT3,
            Format::Dxt5 => Self::DXT5,
            _ => Self::NONE,
        }
    }
}

impl Iwi {
    /// Wrap the extracted payload in a DDS file.
    pub fn to_dds(&self) -> Result<Vec<u8>> {
        let header = DdsHeader::for_info(self.info(), self.data().len())?;

        let mut output = Vec::with_capacity(DDS_MAGIC.len() + DdsHeader::SIZE as usize + self.data().len());
        output.extend_from_slice(DDS_MAGIC);
        output.extend_from_slice(header.as_bytes());
        output.extend_from_slice(self.data());
        Ok(output)
    }
}
