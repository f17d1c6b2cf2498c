//! SoundBank encoding
//!
//! Two-pass: compute the exact output size from the model, then fill a
//! bounded writer. Known chunks are regenerated from the in-memory
//! state; opaque chunks are re-emitted verbatim, all in the declared
//! order recorded at parse time.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::io::BoundedWriter;

use super::types::{ChunkSlot, MediaEntry, SoundBank};
use super::{BKHD, DATA, DIDX, HIRC};

fn chunk_payload_size(bank: &SoundBank, slot: ChunkSlot) -> usize {
    match slot {
        ChunkSlot::Header => bank.header.size(),
        ChunkSlot::MediaIndex => bank.media_index.len() * MediaEntry::SIZE,
        ChunkSlot::MediaData => bank.media_data.len(),
        ChunkSlot::Hierarchy => bank.hierarchy.as_ref().map_or(4, |h| h.size()),
        ChunkSlot::Opaque(index) => bank.opaque[index].data.len(),
    }
}

/// Exact encoded length of the whole bank.
#[must_use]
pub fn bank_size(bank: &SoundBank) -> usize {
    bank.order
        .iter()
        .map(|&slot| 8 + chunk_payload_size(bank, slot))
        .sum()
}

/// Encode a SoundBank to bytes.
pub fn encode_bank(bank: &SoundBank) -> Result<Vec<u8>> {
    let total = bank_size(bank);
    let mut writer = BoundedWriter::new(total, "SoundBank");

    for &slot in &bank.order {
        let tag = match slot {
            ChunkSlot::Header => BKHD,
            ChunkSlot::MediaIndex => DIDX,
            ChunkSlot::MediaData => DATA,
            ChunkSlot::Hierarchy => HIRC,
            ChunkSlot::Opaque(index) => bank.opaque[index].tag,
        };
        writer.write_tag(tag)?;
        writer.write_u32_le(chunk_payload_size(bank, slot) as u32)?;
        match slot {
            ChunkSlot::Header => bank.header.encode(&mut writer)?,
            ChunkSlot::MediaIndex => {
                for entry in &bank.media_index {
                    entry.encode(&mut writer)?;
                }
            }
            ChunkSlot::MediaData => writer.write_bytes(&bank.media_data)?,
            ChunkSlot::Hierarchy => match &bank.hierarchy {
                Some(hierarchy) => hierarchy.encode(&mut writer)?,
                None => writer.write_u32_le(0)?,
            },
            ChunkSlot::Opaque(index) => writer.write_bytes(&bank.opaque[index].data)?,
        }
    }

    let bytes = writer.finish()?;
    debug!(size = bytes.len(), chunks = bank.order.len(), "encoded SoundBank");
    Ok(bytes)
}

/// Encode a SoundBank and write it to a file.
pub fn write_bank(bank: &SoundBank, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_bank(bank)?;
    std::fs::write(path, &bytes)?;
    debug!(path = %path.display(), size = bytes.len(), "wrote SoundBank");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wwise::bank::reader::parse_bank_bytes;
    use crate::wwise::bank::test_support::{chunk, minimal_header_payload};
    use pretty_assertions::assert_eq;

    #[test]
    fn unmutated_bank_round_trips_byte_identical() {
        let mut bytes = chunk(BKHD, &minimal_header_payload(141));
        bytes.extend_from_slice(&chunk(*b"STID", &[3, 1, 4, 1, 5]));
        bytes.extend_from_slice(&chunk(DIDX, &{
            let mut didx = Vec::new();
            didx.extend_from_slice(&77u32.to_le_bytes());
            didx.extend_from_slice(&0u32.to_le_bytes());
            didx.extend_from_slice(&4u32.to_le_bytes());
            didx
        }));
        bytes.extend_from_slice(&chunk(DATA, &[9, 9, 9, 9]));
        bytes.extend_from_slice(&chunk(HIRC, &0u32.to_le_bytes()));

        let bank = parse_bank_bytes(&bytes).unwrap();
        let encoded = encode_bank(&bank).unwrap();
        assert_eq!(encoded, bytes);
        assert_eq!(encoded.len(), bank_size(&bank));
    }

    #[test]
    fn appended_audio_changes_only_media_chunks() {
        let mut bytes = chunk(BKHD, &minimal_header_payload(141));
        bytes.extend_from_slice(&chunk(*b"STID", &[3, 1, 4, 1, 5]));
        bytes.extend_from_slice(&chunk(DIDX, &{
            let mut didx = Vec::new();
            didx.extend_from_slice(&77u32.to_le_bytes());
            didx.extend_from_slice(&0u32.to_le_bytes());
            didx.extend_from_slice(&4u32.to_le_bytes());
            didx
        }));
        bytes.extend_from_slice(&chunk(DATA, &[9, 9, 9, 9]));

        let mut bank = parse_bank_bytes(&bytes).unwrap();
        bank.append_audio(26007159, &[0xAB; 8]).unwrap();
        let encoded = encode_bank(&bank).unwrap();

        // Header and opaque chunk bytes are untouched.
        let unchanged = 8 + bank.header.size() + 8 + 5;
        assert_eq!(&encoded[..unchanged], &bytes[..unchanged]);

        let reparsed = parse_bank_bytes(&encoded).unwrap();
        assert_eq!(reparsed.media_index.len(), 2);
        assert_eq!(reparsed.audio(26007159).unwrap(), &[0xAB; 8]);
        assert_eq!(reparsed.audio(77).unwrap(), &[9, 9, 9, 9]);
    }
}
