//! Byte-level encoding shared by every part of the stream.
//!
//! - Unsigned integers that count or index things use LEB128 varints.
//! - Fixed-width primitives are written little-endian at their natural width.
//! - Text and byte strings are prefixed with their varint length.

// -----------------------------------------------------------------------------
// Modules

mod reader;
mod varint;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use reader::ByteReader;
pub use varint::{MAX_VARINT_LEN, encoded_len};
pub use writer::ByteWriter;
