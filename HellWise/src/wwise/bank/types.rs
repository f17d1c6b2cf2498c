//! SoundBank container types

use crate::error::{Error, Result};
use crate::io::{BoundedWriter, ByteReader};
use crate::wwise::hierarchy::HircCollection;

use super::DATA;

/// Bank header (BKHD) payload.
///
/// The device-allocated flag and memory alignment share one packed u32
/// on disk; they are kept unpacked here. Everything past the project id
/// varies by version and rides along verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankHeader {
    pub version: u32,
    pub id: u32,
    pub language: u32,
    pub alignment: u16,
    pub device_allocated: u16,
    pub project: u32,
    pub tail: Vec<u8>,
}

impl BankHeader {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let version = reader.read_u32_le()?;
        let id = reader.read_u32_le()?;
        let language = reader.read_u32_le()?;
        let packed = reader.read_u32_le()?;
        let project = reader.read_u32_le()?;
        let tail = reader.read_rest().to_vec();
        Ok(Self {
            version,
            id,
            language,
            alignment: (packed & 0xFFFF) as u16,
            device_allocated: (packed >> 16) as u16,
            project,
            tail,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        20 + self.tail.len()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.version)?;
        writer.write_u32_le(self.id)?;
        writer.write_u32_le(self.language)?;
        writer.write_u32_le(u32::from(self.device_allocated) << 16 | u32::from(self.alignment))?;
        writer.write_u32_le(self.project)?;
        writer.write_bytes(&self.tail)
    }
}

/// One media-index (DIDX) record: where a source's audio lives inside
/// the DATA chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaEntry {
    pub source_id: u32,
    pub offset: u32,
    pub size: u32,
}

impl MediaEntry {
    /// Fixed record width.
    pub const SIZE: usize = 12;

    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            source_id: reader.read_u32_le()?,
            offset: reader.read_u32_le()?,
            size: reader.read_u32_le()?,
        })
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.source_id)?;
        writer.write_u32_le(self.offset)?;
        writer.write_u32_le(self.size)
    }
}

/// A chunk this crate does not model, preserved byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueChunk {
    pub tag: [u8; 4],
    pub data: Vec<u8>,
}

/// One position in the bank's declared chunk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkSlot {
    Header,
    MediaIndex,
    MediaData,
    Hierarchy,
    /// Index into [`SoundBank::opaque`].
    Opaque(usize),
}

/// An in-memory Wwise SoundBank.
///
/// Known chunks (header, media index, raw audio, hierarchy) are
/// modeled; everything else is opaque passthrough. `order` records the
/// declared chunk order of the parsed input so re-encoding reproduces
/// it exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundBank {
    pub header: BankHeader,
    pub media_index: Vec<MediaEntry>,
    pub media_data: Vec<u8>,
    pub hierarchy: Option<HircCollection>,
    pub opaque: Vec<OpaqueChunk>,
    pub order: Vec<ChunkSlot>,
}

/// Audio payloads inside DATA start on 16-byte boundaries.
pub(super) fn align16(len: usize) -> usize {
    (len + 15) & !15
}

impl SoundBank {
    /// The bank's format version, from the header chunk.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.header.version
    }

    /// The media-index record for a source id.
    #[must_use]
    pub fn media_entry(&self, source_id: u32) -> Option<&MediaEntry> {
        self.media_index
            .iter()
            .find(|entry| entry.source_id == source_id)
    }

    /// Borrow a source's audio bytes from the DATA chunk.
    pub fn audio(&self, source_id: u32) -> Result<&[u8]> {
        let entry = self
            .media_entry(source_id)
            .ok_or(Error::SourceNotFound { source_id })?;
        let start = entry.offset as usize;
        let end = start + entry.size as usize;
        self.media_data.get(start..end).ok_or_else(|| Error::MalformedChunk {
            tag: DATA,
            message: format!(
                "media entry for source {source_id} covers {start}..{end}, DATA is {} bytes",
                self.media_data.len()
            ),
        })
    }

    /// Append new audio to the DATA chunk, 16-byte aligned, and insert
    /// the matching media-index record. The source id must be new.
    pub fn append_audio(&mut self, source_id: u32, bytes: &[u8]) -> Result<()> {
        if self.media_entry(source_id).is_some() {
            return Err(Error::DuplicateSourceId { source_id });
        }
        let offset = self.push_aligned(bytes);
        self.media_index.push(MediaEntry {
            source_id,
            offset,
            size: bytes.len() as u32,
        });
        self.ensure_media_slots();
        Ok(())
    }

    /// Swap a source's audio for new bytes. Same-size payloads are
    /// overwritten in place; a different size appends at the end of
    /// DATA and retargets the index record, so no other entry's offset
    /// moves.
    pub fn replace_audio(&mut self, source_id: u32, bytes: &[u8]) -> Result<()> {
        let position = self
            .media_index
            .iter()
            .position(|entry| entry.source_id == source_id)
            .ok_or(Error::SourceNotFound { source_id })?;
        let entry = self.media_index[position];
        if bytes.len() == entry.size as usize {
            let start = entry.offset as usize;
            self.media_data[start..start + bytes.len()].copy_from_slice(bytes);
        } else {
            let offset = self.push_aligned(bytes);
            self.media_index[position].offset = offset;
            self.media_index[position].size = bytes.len() as u32;
        }
        Ok(())
    }

    /// Point a `Sound` hierarchy object at one of this bank's media
    /// entries, updating its in-memory media size to match.
    pub fn set_sound_source(&mut self, sound_id: u32, source_id: u32) -> Result<()> {
        let size = self
            .media_entry(source_id)
            .ok_or(Error::SourceNotFound { source_id })?
            .size;
        let hierarchy = self
            .hierarchy
            .as_mut()
            .ok_or(Error::ObjectNotFound { id: sound_id })?;
        hierarchy.set_sound_source(sound_id, source_id, size)
    }

    fn push_aligned(&mut self, bytes: &[u8]) -> u32 {
        let offset = align16(self.media_data.len());
        self.media_data.resize(offset, 0);
        self.media_data.extend_from_slice(bytes);
        offset as u32
    }

    /// A bank with no audio has no DIDX/DATA slots in its declared
    /// order; the first append creates them, index before data.
    fn ensure_media_slots(&mut self) {
        if !self.order.contains(&ChunkSlot::MediaIndex) {
            self.order.push(ChunkSlot::MediaIndex);
        }
        if !self.order.contains(&ChunkSlot::MediaData) {
            self.order.push(ChunkSlot::MediaData);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_with_audio() -> SoundBank {
        let mut bank = SoundBank {
            order: vec![ChunkSlot::Header],
            ..SoundBank::default()
        };
        bank.append_audio(100, &[1u8; 20]).unwrap();
        bank
    }

    #[test]
    fn append_audio_aligns_and_indexes() {
        let mut bank = bank_with_audio();
        bank.append_audio(200, &[2u8; 4]).unwrap();

        let first = *bank.media_entry(100).unwrap();
        let second = *bank.media_entry(200).unwrap();
        assert_eq!((first.offset, first.size), (0, 20));
        assert_eq!((second.offset, second.size), (32, 4));
        assert_eq!(bank.audio(200).unwrap(), &[2u8; 4]);
        assert_eq!(&bank.media_data[20..32], &[0u8; 12]);
        assert!(bank.order.contains(&ChunkSlot::MediaIndex));
        assert!(bank.order.contains(&ChunkSlot::MediaData));
    }

    #[test]
    fn append_audio_rejects_duplicate_source_id() {
        let mut bank = bank_with_audio();
        assert!(matches!(
            bank.append_audio(100, &[0u8; 8]),
            Err(Error::DuplicateSourceId { source_id: 100 })
        ));
    }

    #[test]
    fn replace_audio_in_place_and_by_retarget() {
        let mut bank = bank_with_audio();
        bank.append_audio(200, &[2u8; 4]).unwrap();

        // Same size: in place, no offset changes anywhere.
        bank.replace_audio(100, &[9u8; 20]).unwrap();
        assert_eq!(bank.media_entry(100).unwrap().offset, 0);
        assert_eq!(bank.audio(100).unwrap(), &[9u8; 20]);
        assert_eq!(bank.media_entry(200).unwrap().offset, 32);

        // Different size: appended at the end, other entries untouched.
        bank.replace_audio(100, &[7u8; 6]).unwrap();
        let moved = *bank.media_entry(100).unwrap();
        assert_eq!((moved.offset, moved.size), (48, 6));
        assert_eq!(bank.audio(100).unwrap(), &[7u8; 6]);
        assert_eq!(bank.media_entry(200).unwrap().offset, 32);
        assert_eq!(bank.audio(200).unwrap(), &[2u8; 4]);
    }

    #[test]
    fn audio_bounds_are_checked() {
        let mut bank = bank_with_audio();
        bank.media_index[0].size = 9999;
        assert!(matches!(
            bank.audio(100),
            Err(Error::MalformedChunk { tag: DATA, .. })
        ));
        assert!(matches!(
            bank.audio(555),
            Err(Error::SourceNotFound { source_id: 555 })
        ));
    }

    #[test]
    fn header_round_trip_packs_alignment() {
        let header = BankHeader {
            version: 141,
            id: 0xAABBCCDD,
            language: 0,
            alignment: 16,
            device_allocated: 1,
            project: 4242,
            tail: vec![0; 8],
        };
        let mut w = BoundedWriter::new(header.size(), "BankHeader");
        header.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        assert_eq!(&bytes[12..16], &[16, 0, 1, 0]);
        let mut r = ByteReader::new(&bytes);
        assert_eq!(BankHeader::parse(&mut r).unwrap(), header);
    }
}
