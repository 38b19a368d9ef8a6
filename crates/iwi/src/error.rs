//! Error types for IWI decoding.

use thiserror::Error;

/// Errors that can occur when decoding IWI files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] iwi_common::Error),

    /// Invalid IWI magic.
    #[error("invalid IWI magic: expected 'IWi', got {0:?}")]
    InvalidMagic([u8; 3]),

    /// Version byte not written by any known game.
    #[error("unsupported IWI version: {0:#04x}")]
    UnsupportedVersion(u8),

    /// Mip payload extends past the end of the file.
    #[error("mip data at {offset} needs {needed} bytes but only {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Inferred mip offset or size is negative.
    #[error("invalid mip range: offset {offset}, size {size}")]
    InvalidMipRange { offset: i32, size: i32 },

    /// Offset table produced no mip entries.
    #[error("mip table is empty")]
    EmptyMipTable,

    /// Format code has no DDS equivalent.
    #[error("format code {0:#04x} cannot be stored in a DDS container")]
    UnsupportedDdsFormat(u8),
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be read.
    Io,
    /// The input is not an IWI file this crate understands.
    Format,
    /// A read, seek or mip range lies outside the input.
    Truncated,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        use iwi_common::Error as CommonError;

        match self {
            Error::Io(_) | Error::Common(CommonError::Io(_)) => ErrorKind::Io,
            Error::InvalidMagic(_)
            | Error::UnsupportedVersion(_)
            | Error::EmptyMipTable
            | Error::UnsupportedDdsFormat(_)
            | Error::Common(CommonError::InvalidMagic { .. }) => ErrorKind::Format,
            Error::Truncated { .. }
            | Error::InvalidMipRange { .. }
            | Error::Common(CommonError::UnexpectedEof { .. })
            | Error::Common(CommonError::SeekOutOfBounds { .. }) => ErrorKind::Truncated,
        }
    }
}

/// Result type for IWI operations.
pub type Result<T> = std::result::Result<T, Error>;
