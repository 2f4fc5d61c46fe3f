//! Binary (`.gem`) decoder.
//!
//! The binary form is a little-endian record stream with no record tags.
//! Facet records carry already-clipped boundary rings; a trailer record,
//! recognized by its 16-byte header shape, carries the design metadata.
//! Cutting angles, distances, and facet indices are not stored and are
//! recovered by running the plane construction backwards.

mod cursor;
mod records;
mod reader;

pub use reader::decode_binary;
