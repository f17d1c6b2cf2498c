//! Interactive-music object kinds
//!
//! Music segments and the two music containers share a node prefix
//! (flags, shared parameter block, child list); tracks carry source
//! descriptors instead of children. Tempo grids, stingers, transition
//! rules and playlists are not edited by this crate and ride along as
//! opaque tails.

use crate::error::Result;
use crate::io::{BoundedWriter, ByteReader};

use super::base_params::BaseParameter;
use super::common::{child_ids_size, encode_child_ids, parse_child_ids, SourceDescriptor};

/// Shared payload of `MusicSegment`, `MusicSwitchCntr` and
/// `MusicRanSeqCntr`.
#[derive(Debug, Clone, PartialEq)]
pub struct MusicNode {
    pub id: u32,
    pub flags: u8,
    pub base: BaseParameter,
    pub children: Vec<u32>,
    pub tail: Vec<u8>,
}

impl MusicNode {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            id: reader.read_u32_le()?,
            flags: reader.read_u8()?,
            base: BaseParameter::parse(reader)?,
            children: parse_child_ids(reader)?,
            tail: reader.read_rest().to_vec(),
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        5 + self.base.size() + child_ids_size(&self.children) + self.tail.len()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        writer.write_u8(self.flags)?;
        self.base.encode(writer)?;
        encode_child_ids(&self.children, writer)?;
        writer.write_bytes(&self.tail)
    }
}

/// A music track: flags and a source-descriptor list, plus an opaque
/// tail (clips, automation, switch associations).
#[derive(Debug, Clone, PartialEq)]
pub struct MusicTrack {
    pub id: u32,
    pub flags: u8,
    pub sources: Vec<SourceDescriptor>,
    pub tail: Vec<u8>,
}

impl MusicTrack {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let id = reader.read_u32_le()?;
        let flags = reader.read_u8()?;
        let count = reader.read_u32_le()? as usize;
        let mut sources = Vec::with_capacity(count);
        for _ in 0..count {
            sources.push(SourceDescriptor::parse(reader)?);
        }
        let tail = reader.read_rest().to_vec();
        Ok(Self {
            id,
            flags,
            sources,
            tail,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        9 + self.sources.len() * SourceDescriptor::SIZE + self.tail.len()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        writer.write_u8(self.flags)?;
        writer.write_u32_le(self.sources.len() as u32)?;
        for source in &self.sources {
            source.encode(writer)?;
        }
        writer.write_bytes(&self.tail)
    }
}
