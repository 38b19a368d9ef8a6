//! IWI texture container decoding.
//!
//! Call of Duty titles store textures as `.iwi` files: a short header, a
//! pixel-format block and a table of mip level offsets, followed by the mip
//! payloads themselves. The exact placement of the metadata and the size of
//! the offset table depend on which game wrote the file:
//!
//! - `0x05` - Call of Duty 2
//! - `0x06` - Call of Duty 4 / World at War
//! - `0x08` - Modern Warfare 2 / Modern Warfare 3
//! - `0x0D` - Black Ops
//! - `0x1B` - Black Ops II
//!
//! This crate resolves the layout, infers mip sizes from the offset table and
//! extracts the largest mip level verbatim. Pixel data is never decoded, but
//! the payload can be wrapped in a DDS container with [`Iwi::to_dds`].
//!
//! # Example
//!
//! ```no_run
//! use iwi::Iwi;
//!
//! let image = Iwi::open("textures/hud_icon.iwi")?;
//! println!(
//!     "{}x{} {:?}, {} bytes",
//!     image.info().width,
//!     image.info().height,
//!     image.format(),
//!     image.data().len()
//! );
//! std::fs::write("hud_icon.dds", image.to_dds()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod dds;
mod decode;
mod error;
mod format;
mod header;
mod info;
mod layout;
mod mipmap;

#[cfg(test)]
mod testutil;

pub use dds::{DdsHeader, DdsPixelFormat, FourCC, DDS_MAGIC};
pub use decode::{Iwi, MipTable};
pub use error::{Error, ErrorKind, Result};
pub use format::Format;
pub use header::{Game, IwiHeader, SUPPORTED_VERSIONS};
pub use info::IwiInfo;
pub use layout::Layout;
pub use mipmap::{infer_mip_entries, select_largest, sort_by_size, MipEntry};
