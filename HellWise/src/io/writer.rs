//! Fixed-capacity writer with fatal overflow detection

use crate::error::{Error, Result};

/// A writer with an exact target capacity fixed at construction.
///
/// Every codec in this crate computes the encoded length of a structure
/// before encoding it. The `BoundedWriter` is the cross-check: any write
/// past the declared capacity fails with [`Error::WriterOverflow`], and
/// [`BoundedWriter::finish`] fails with [`Error::SizeMismatch`] unless the
/// buffer was filled exactly. Both are invariant violations, not
/// recoverable I/O conditions.
#[derive(Debug)]
pub struct BoundedWriter {
    buf: Vec<u8>,
    capacity: usize,
    what: &'static str,
}

impl BoundedWriter {
    /// Create a writer that must be filled with exactly `capacity` bytes.
    ///
    /// `what` names the structure being encoded, for error messages.
    #[must_use]
    pub fn new(capacity: usize, what: &'static str) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            what,
        }
    }

    /// Bytes written so far.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.buf.len()
    }

    /// The fixed target capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn check(&self, needed: usize) -> Result<()> {
        if self.buf.len() + needed > self.capacity {
            return Err(Error::WriterOverflow {
                what: self.what,
                position: self.buf.len(),
                needed,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.check(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    pub fn write_u16_le(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32_le(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i32_le(&mut self, value: i32) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_f32_le(&mut self, value: f32) -> Result<()> {
        self.write_u32_le(value.to_bits())
    }

    /// Write a 4-byte chunk tag.
    pub fn write_tag(&mut self, tag: [u8; 4]) -> Result<()> {
        self.write_bytes(&tag)
    }

    /// Consume the writer, returning the buffer.
    ///
    /// Fails with [`Error::SizeMismatch`] unless exactly `capacity` bytes
    /// were written, which means a `size()` function disagreed with its
    /// `encode()` counterpart.
    pub fn finish(self) -> Result<Vec<u8>> {
        if self.buf.len() != self.capacity {
            return Err(Error::SizeMismatch {
                what: self.what,
                expected: self.capacity,
                actual: self.buf.len(),
            });
        }
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fill_succeeds() {
        let mut w = BoundedWriter::new(7, "test");
        w.write_u8(1).unwrap();
        w.write_u16_le(2).unwrap();
        w.write_u32_le(3).unwrap();
        assert_eq!(w.finish().unwrap(), vec![1, 2, 0, 3, 0, 0, 0]);
    }

    #[test]
    fn overflow_is_fatal() {
        let mut w = BoundedWriter::new(2, "test");
        w.write_u8(0).unwrap();
        match w.write_u32_le(0) {
            Err(Error::WriterOverflow { position, needed, capacity, .. }) => {
                assert_eq!(position, 1);
                assert_eq!(needed, 4);
                assert_eq!(capacity, 2);
            }
            other => panic!("expected WriterOverflow, got {other:?}"),
        }
    }

    #[test]
    fn short_fill_is_a_size_mismatch() {
        let mut w = BoundedWriter::new(4, "test");
        w.write_u8(0).unwrap();
        match w.finish() {
            Err(Error::SizeMismatch { expected, actual, .. }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 1);
            }
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
    }
}
