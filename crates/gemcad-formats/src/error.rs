//! Error types for design-file decoding.

use thiserror::Error;

/// Errors that can occur while identifying or decoding a design file.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error reading the input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stream too short to carry the format magic.
    #[error("stream too short to identify as a GemCad design file (need at least 8 bytes)")]
    Unidentifiable,

    /// The binary stream ended in the middle of a record.
    #[error("truncated record: needed {needed} byte(s) at offset {offset:#06x}")]
    Truncated {
        /// Stream offset where the failing read began.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
    },
}

impl FormatError {
    /// Create a truncated-record error.
    pub fn truncated(offset: usize, needed: usize) -> Self {
        Self::Truncated { offset, needed }
    }
}
