//! Format identification by magic prefix.

use crate::error::FormatError;

/// The magic prefix of the text form. Binary files start with raw facet
/// geometry and never begin with it.
const TEXT_MAGIC: &[u8] = b"GemCad ";

/// The two on-disk forms a design file can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignFormat {
    /// Line-oriented `.asc` recipe.
    Text,
    /// Little-endian `.gem` record stream.
    Binary,
}

/// Identify the format of a design-file stream.
///
/// Streams shorter than 8 bytes cannot be told apart and are rejected.
pub fn identify(bytes: &[u8]) -> Result<DesignFormat, FormatError> {
    if bytes.len() < 8 {
        return Err(FormatError::Unidentifiable);
    }
    if &bytes[..TEXT_MAGIC.len()] == TEXT_MAGIC {
        Ok(DesignFormat::Text)
    } else {
        Ok(DesignFormat::Binary)
    }
}
