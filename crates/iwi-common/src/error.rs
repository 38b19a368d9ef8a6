//! Error types for iwi-common.

use thiserror::Error;

/// Common error type for binary reading.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer at {position}: needed {needed} bytes but only {available} available")]
    UnexpectedEof {
        position: usize,
        needed: usize,
        available: usize,
    },

    /// Seek target lies past the end of the buffer.
    #[error("seek to {position} is out of bounds (buffer length: {len})")]
    SeekOutOfBounds { position: usize, len: usize },

    /// Invalid magic bytes encountered.
    #[error("invalid magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic {
        expected: Vec<u8>,
        actual: Vec<u8>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
