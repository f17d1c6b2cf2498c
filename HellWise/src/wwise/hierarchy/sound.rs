//! The Sound object kind

use crate::error::Result;
use crate::io::{BoundedWriter, ByteReader};

use super::base_params::BaseParameter;
use super::common::SourceDescriptor;

/// A single playable sound: one audio source plus the shared parameter
/// block.
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    pub id: u32,
    pub source: SourceDescriptor,
    pub base: BaseParameter,
}

impl Sound {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            id: reader.read_u32_le()?,
            source: SourceDescriptor::parse(reader)?,
            base: BaseParameter::parse(reader)?,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        4 + SourceDescriptor::SIZE + self.base.size()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        self.source.encode(writer)?;
        self.base.encode(writer)
    }

    /// Point this sound at different in-bank media.
    pub fn set_source(&mut self, source_id: u32, media_size: u32) {
        self.source.source_id = source_id;
        self.source.in_memory_media_size = media_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let sound = Sound {
            id: 0xDEADBEEF,
            source: SourceDescriptor {
                plugin_id: 0x00040001,
                stream_type: 0,
                source_id: 26007159,
                in_memory_media_size: 4096,
                source_bits: 0,
            },
            base: BaseParameter {
                direct_parent_id: 42,
                ..BaseParameter::default()
            },
        };
        let mut w = BoundedWriter::new(sound.size(), "Sound");
        sound.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(Sound::parse(&mut r).unwrap(), sound);
        assert!(r.is_empty());
    }
}
