//! Zero-copy cursor over an in-memory byte buffer

use crate::error::{Error, Result};

/// A zero-copy reader over a borrowed byte buffer.
///
/// Scalar reads return owned values; [`ByteReader::read_bytes`] returns a
/// sub-slice borrowing from the source buffer, which is safe because the
/// buffer outlives the parse. Every read that would run past the end of
/// the buffer fails with [`Error::UnexpectedEof`] carrying the offset.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True when every byte has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    fn eof(&self, needed: usize) -> Error {
        Error::UnexpectedEof {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }

    /// Borrow the next `len` bytes without copying.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(self.eof(len));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Skip `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Read a 4-byte chunk tag.
    pub fn read_tag(&mut self) -> Result<[u8; 4]> {
        let bytes = self.read_bytes(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(self.read_u32_le()? as i32)
    }

    pub fn read_f32_le(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32_le()?))
    }

    /// Borrow everything left in the buffer.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_and_position() {
        let data = [0x01, 0x02, 0x00, 0x00, 0x00, 0xFF];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_u32_le().unwrap(), 2);
        assert_eq!(r.pos(), 5);
        assert_eq!(r.remaining(), 1);
        assert_eq!(r.read_u8().unwrap(), 0xFF);
        assert!(r.is_empty());
    }

    #[test]
    fn underrun_reports_offset() {
        let data = [0x01, 0x02];
        let mut r = ByteReader::new(&data);
        r.read_u8().unwrap();
        match r.read_u32_le() {
            Err(Error::UnexpectedEof { offset, needed, remaining }) => {
                assert_eq!(offset, 1);
                assert_eq!(needed, 4);
                assert_eq!(remaining, 1);
            }
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
    }

    #[test]
    fn read_bytes_is_zero_copy() {
        let data = vec![1u8, 2, 3, 4, 5];
        let slice = {
            let mut r = ByteReader::new(&data);
            r.skip(1).unwrap();
            r.read_bytes(3).unwrap()
        };
        // The slice borrows from `data`, not from the reader.
        assert_eq!(slice, &data[1..4]);
    }

    #[test]
    fn read_rest_consumes_everything() {
        let data = [9u8, 8, 7];
        let mut r = ByteReader::new(&data);
        r.read_u8().unwrap();
        assert_eq!(r.read_rest(), &[8, 7]);
        assert!(r.is_empty());
        assert_eq!(r.read_rest(), &[] as &[u8]);
    }
}
