#![warn(missing_docs)]

//! Decoders for the GemCad `.asc` (text) and `.gem` (binary) faceting
//! design formats.
//!
//! Both decoders produce the same [`gemcad_model::DesignDocument`]: design
//! metadata plus tiers of facets with boundary polygons and subdivided
//! rendering triangles. The text form stores the cutting recipe and gets
//! its geometry rebuilt by clipping a seed cube; the binary form stores
//! the clipped geometry and gets its recipe recovered by inverse plane
//! math.
//!
//! # Example
//!
//! ```no_run
//! let document = gemcad_formats::import_path("design.gem").unwrap();
//! println!("{} tiers", document.tiers.len());
//! ```

mod asc;
mod error;
mod gem;
mod sniff;

pub use asc::decode_text;
pub use error::FormatError;
pub use gem::decode_binary;
pub use sniff::{identify, DesignFormat};

use std::path::Path;

use gemcad_model::DesignDocument;

/// Import a design file from disk, identifying its format by magic.
pub fn import_path(path: impl AsRef<Path>) -> Result<DesignDocument, FormatError> {
    let data = std::fs::read(path)?;
    import_bytes(&data)
}

/// Import a design from an in-memory byte stream.
pub fn import_bytes(bytes: &[u8]) -> Result<DesignDocument, FormatError> {
    match identify(bytes)? {
        DesignFormat::Text => Ok(decode_text(&String::from_utf8_lossy(bytes))),
        DesignFormat::Binary => decode_binary(bytes),
    }
}
