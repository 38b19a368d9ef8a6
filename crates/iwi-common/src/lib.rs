//! Common utilities for the IWI crates.
//!
//! - [`BinaryReader`] - Bounds-checked little-endian reading from byte slices

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;
