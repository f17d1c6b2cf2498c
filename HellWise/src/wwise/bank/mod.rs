//! SoundBank chunk container: parse, mutate, re-encode
//!
//! A bank is a flat little-endian chunk stream. The four chunks this
//! crate models are the header (BKHD), the media index (DIDX), the raw
//! audio payload (DATA) and the object hierarchy (HIRC); everything
//! else round-trips as opaque bytes in its original position.

pub mod reader;
pub mod types;
pub mod writer;

/// Bank header chunk tag. Must be the first chunk of every bank.
pub const BKHD: [u8; 4] = *b"BKHD";
/// Media index chunk tag.
pub const DIDX: [u8; 4] = *b"DIDX";
/// Raw audio data chunk tag.
pub const DATA: [u8; 4] = *b"DATA";
/// Object hierarchy chunk tag.
pub const HIRC: [u8; 4] = *b"HIRC";

pub use reader::{parse_bank_bytes, read_bank};
pub use types::{BankHeader, ChunkSlot, MediaEntry, OpaqueChunk, SoundBank};
pub use writer::{bank_size, encode_bank, write_bank};

#[cfg(test)]
pub(crate) mod test_support {
    /// Frame a payload as one tagged chunk.
    pub fn chunk(tag: [u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + payload.len());
        bytes.extend_from_slice(&tag);
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    /// A 20-byte BKHD payload with no trailing bytes.
    pub fn minimal_header_payload(version: u32) -> Vec<u8> {
        let mut payload = Vec::with_capacity(20);
        payload.extend_from_slice(&version.to_le_bytes());
        payload.extend_from_slice(&0x1234_5678u32.to_le_bytes()); // bank id
        payload.extend_from_slice(&0u32.to_le_bytes()); // language
        payload.extend_from_slice(&16u32.to_le_bytes()); // alignment, not device-allocated
        payload.extend_from_slice(&0u32.to_le_bytes()); // project
        payload
    }
}
