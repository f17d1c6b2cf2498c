//! SoundBank parsing
//!
//! Banks are a flat sequence of tagged chunks. The header chunk must
//! come first; after that, known chunks are decoded into the model and
//! anything else is kept as an opaque slot so the declared order
//! survives re-encoding.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::io::ByteReader;
use crate::wwise::hierarchy::HircCollection;

use super::types::{BankHeader, ChunkSlot, MediaEntry, OpaqueChunk, SoundBank};
use super::{BKHD, DATA, DIDX, HIRC};

/// Parse a SoundBank from raw bytes.
pub fn parse_bank_bytes(bytes: &[u8]) -> Result<SoundBank> {
    let mut reader = ByteReader::new(bytes);
    let mut bank = SoundBank::default();
    let mut seen_header = false;

    while !reader.is_empty() {
        let tag = reader.read_tag()?;
        let declared = reader.read_u32_le()? as usize;
        if declared > reader.remaining() {
            return Err(Error::TruncatedChunk {
                tag,
                declared,
                available: reader.remaining(),
            });
        }
        let payload = reader.read_bytes(declared)?;

        if !seen_header {
            if tag != BKHD {
                return Err(Error::InvalidBankMagic { tag });
            }
            let mut r = ByteReader::new(payload);
            bank.header = BankHeader::parse(&mut r)?;
            bank.order.push(ChunkSlot::Header);
            seen_header = true;
            continue;
        }

        match tag {
            BKHD => return Err(Error::DuplicateChunk { tag }),
            DIDX => {
                if bank.order.contains(&ChunkSlot::MediaIndex) {
                    return Err(Error::DuplicateChunk { tag });
                }
                if declared % MediaEntry::SIZE != 0 {
                    return Err(Error::MalformedChunk {
                        tag,
                        message: format!(
                            "payload of {declared} bytes is not a multiple of {}",
                            MediaEntry::SIZE
                        ),
                    });
                }
                let mut r = ByteReader::new(payload);
                for _ in 0..declared / MediaEntry::SIZE {
                    bank.media_index.push(MediaEntry::parse(&mut r)?);
                }
                bank.order.push(ChunkSlot::MediaIndex);
            }
            DATA => {
                if bank.order.contains(&ChunkSlot::MediaData) {
                    return Err(Error::DuplicateChunk { tag });
                }
                bank.media_data = payload.to_vec();
                bank.order.push(ChunkSlot::MediaData);
            }
            HIRC => {
                if bank.order.contains(&ChunkSlot::Hierarchy) {
                    return Err(Error::DuplicateChunk { tag });
                }
                let mut r = ByteReader::new(payload);
                let hierarchy = HircCollection::parse(&mut r)?;
                if !r.is_empty() {
                    return Err(Error::MalformedChunk {
                        tag,
                        message: format!("{} bytes left after last object", r.remaining()),
                    });
                }
                debug!(objects = hierarchy.len(), "parsed hierarchy chunk");
                bank.hierarchy = Some(hierarchy);
                bank.order.push(ChunkSlot::Hierarchy);
            }
            other => {
                bank.opaque.push(OpaqueChunk {
                    tag: other,
                    data: payload.to_vec(),
                });
                bank.order.push(ChunkSlot::Opaque(bank.opaque.len() - 1));
            }
        }
    }

    if !seen_header {
        return Err(Error::InvalidBankMagic { tag: [0; 4] });
    }
    debug!(
        version = bank.header.version,
        id = bank.header.id,
        chunks = bank.order.len(),
        "parsed SoundBank"
    );
    Ok(bank)
}

/// Read and parse a SoundBank file.
pub fn read_bank(path: impl AsRef<Path>) -> Result<SoundBank> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading SoundBank");
    let bytes = std::fs::read(path)?;
    parse_bank_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wwise::bank::test_support::{chunk, minimal_header_payload};

    #[test]
    fn first_chunk_must_be_bkhd() {
        let bytes = chunk(*b"DIDX", &[]);
        assert!(matches!(
            parse_bank_bytes(&bytes),
            Err(Error::InvalidBankMagic { tag }) if &tag == b"DIDX"
        ));
    }

    #[test]
    fn truncated_chunk_is_reported_with_counts() {
        let mut bytes = chunk(BKHD, &minimal_header_payload(141));
        bytes.extend_from_slice(b"DATA");
        bytes.extend_from_slice(&100u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 3]);
        assert!(matches!(
            parse_bank_bytes(&bytes),
            Err(Error::TruncatedChunk { declared: 100, available: 3, .. })
        ));
    }

    #[test]
    fn didx_length_must_be_record_aligned() {
        let mut bytes = chunk(BKHD, &minimal_header_payload(141));
        bytes.extend_from_slice(&chunk(DIDX, &[0u8; 13]));
        assert!(matches!(
            parse_bank_bytes(&bytes),
            Err(Error::MalformedChunk { tag: DIDX, .. })
        ));
    }

    #[test]
    fn duplicate_known_chunk_is_fatal() {
        let mut bytes = chunk(BKHD, &minimal_header_payload(141));
        bytes.extend_from_slice(&chunk(DATA, &[1, 2, 3]));
        bytes.extend_from_slice(&chunk(DATA, &[4, 5, 6]));
        assert!(matches!(
            parse_bank_bytes(&bytes),
            Err(Error::DuplicateChunk { tag: DATA })
        ));
    }

    #[test]
    fn unknown_chunks_pass_through_in_order() {
        let mut bytes = chunk(BKHD, &minimal_header_payload(141));
        bytes.extend_from_slice(&chunk(*b"META", &[7, 7]));
        bytes.extend_from_slice(&chunk(*b"INIT", &[8]));

        let bank = parse_bank_bytes(&bytes).unwrap();
        assert_eq!(bank.opaque.len(), 2);
        assert_eq!(bank.opaque[0].tag, *b"META");
        assert_eq!(
            bank.order,
            vec![ChunkSlot::Header, ChunkSlot::Opaque(0), ChunkSlot::Opaque(1)]
        );
    }
}
