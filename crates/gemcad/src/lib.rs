#![warn(missing_docs)]

//! gemcad — decoder for GemCad faceting designs
//!
//! Reads both GemCad file formats, the textual `.asc` recipe and the
//! reverse-engineered binary `.gem` stream, into one JSON-serializable
//! [`DesignDocument`] with per-facet boundary polygons and subdivided
//! rendering triangles.
//!
//! # Example
//!
//! ```rust,no_run
//! use gemcad::import_path;
//!
//! let document = import_path("designs/sample.asc").unwrap();
//! for tier in &document.tiers {
//!     println!(
//!         "tier {} at {:.2} degrees, {} facet(s)",
//!         tier.number,
//!         tier.angle,
//!         tier.indices.len()
//!     );
//! }
//! println!("{}", document.to_json().unwrap());
//! ```

pub use gemcad_formats::{
    decode_binary, decode_text, identify, import_bytes, import_path, DesignFormat, FormatError,
};
pub use gemcad_math::Point3;
pub use gemcad_mesh::{OrientedVertex, Polygon, PolygonSet, Triangle};
pub use gemcad_model::{DesignDocument, DesignMetadata, FacetSpec, TierSpec};

/// Geometric reconstruction engine used by the decoders.
pub use gemcad_geometry as geometry;
