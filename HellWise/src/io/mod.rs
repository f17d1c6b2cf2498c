//! Binary I/O primitives
//!
//! Two building blocks shared by every codec in the crate: a zero-copy
//! [`ByteReader`] over an in-memory buffer, and a fixed-capacity
//! [`BoundedWriter`] that cross-checks size computations against the bytes
//! actually encoded. All scalar accessors name their byte order explicitly.

mod reader;
mod writer;

pub use reader::ByteReader;
pub use writer::BoundedWriter;
