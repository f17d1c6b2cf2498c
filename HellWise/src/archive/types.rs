//! Helldivers 2 archive record types

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};

use super::{DEP_PATH_OFFSET, DEP_STRLEN_OFFSET};

/// One 32-byte type-table record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeRecord {
    pub unknown: u64,
    pub type_id: u64,
    pub count: u64,
    pub alignment: u32,
    pub unknown2: u32,
}

impl TypeRecord {
    /// Fixed record width.
    pub const SIZE: usize = 32;

    pub fn read(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        Ok(Self {
            unknown: cursor.read_u64::<LittleEndian>()?,
            type_id: cursor.read_u64::<LittleEndian>()?,
            count: cursor.read_u64::<LittleEndian>()?,
            alignment: cursor.read_u32::<LittleEndian>()?,
            unknown2: cursor.read_u32::<LittleEndian>()?,
        })
    }

    pub fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u64::<LittleEndian>(self.unknown)?;
        out.write_u64::<LittleEndian>(self.type_id)?;
        out.write_u64::<LittleEndian>(self.count)?;
        out.write_u32::<LittleEndian>(self.alignment)?;
        out.write_u32::<LittleEndian>(self.unknown2)?;
        Ok(())
    }
}

/// One 80-byte per-file asset header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetHeader {
    pub file_id: u64,
    pub type_id: u64,
    pub data_offset: u64,
    pub stream_offset: u64,
    pub gpu_offset: u64,
    pub unknown1: u64,
    pub unknown2: u64,
    pub data_size: u32,
    pub stream_size: u32,
    pub gpu_size: u32,
    pub unknown3: u32,
    pub unknown4: u32,
    pub index: u32,
}

impl AssetHeader {
    /// Fixed record width.
    pub const SIZE: usize = 80;

    pub fn read(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        Ok(Self {
            file_id: cursor.read_u64::<LittleEndian>()?,
            type_id: cursor.read_u64::<LittleEndian>()?,
            data_offset: cursor.read_u64::<LittleEndian>()?,
            stream_offset: cursor.read_u64::<LittleEndian>()?,
            gpu_offset: cursor.read_u64::<LittleEndian>()?,
            unknown1: cursor.read_u64::<LittleEndian>()?,
            unknown2: cursor.read_u64::<LittleEndian>()?,
            data_size: cursor.read_u32::<LittleEndian>()?,
            stream_size: cursor.read_u32::<LittleEndian>()?,
            gpu_size: cursor.read_u32::<LittleEndian>()?,
            unknown3: cursor.read_u32::<LittleEndian>()?,
            unknown4: cursor.read_u32::<LittleEndian>()?,
            index: cursor.read_u32::<LittleEndian>()?,
        })
    }

    pub fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u64::<LittleEndian>(self.file_id)?;
        out.write_u64::<LittleEndian>(self.type_id)?;
        out.write_u64::<LittleEndian>(self.data_offset)?;
        out.write_u64::<LittleEndian>(self.stream_offset)?;
        out.write_u64::<LittleEndian>(self.gpu_offset)?;
        out.write_u64::<LittleEndian>(self.unknown1)?;
        out.write_u64::<LittleEndian>(self.unknown2)?;
        out.write_u32::<LittleEndian>(self.data_size)?;
        out.write_u32::<LittleEndian>(self.stream_size)?;
        out.write_u32::<LittleEndian>(self.gpu_size)?;
        out.write_u32::<LittleEndian>(self.unknown3)?;
        out.write_u32::<LittleEndian>(self.unknown4)?;
        out.write_u32::<LittleEndian>(self.index)?;
        Ok(())
    }

    /// Slice this asset's data region out of the archive, bounds
    /// checked.
    pub fn data<'a>(&self, archive: &'a [u8]) -> Result<&'a [u8]> {
        let start = usize::try_from(self.data_offset).ok();
        let end = start.and_then(|s| s.checked_add(self.data_size as usize));
        match (start, end) {
            (Some(start), Some(end)) if end <= archive.len() => Ok(&archive[start..end]),
            _ => Err(Error::AssetOutOfBounds {
                file_id: self.file_id,
                offset: self.data_offset,
                size: u64::from(self.data_size),
                archive_len: archive.len(),
            }),
        }
    }
}

/// The side-record carried inside an extracted `.st_bnk`, holding what
/// patch generation needs: which archive file this was, the original
/// obfuscation bytes, and the correlated dependency's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaRecord {
    pub integration_type: u8,
    pub file_id: u64,
    /// The 4 original bytes replaced by the plaintext marker.
    pub xor: [u8; 4],
    /// The wwise-dependency asset's full data payload, verbatim.
    pub dependency: Vec<u8>,
}

impl MetaRecord {
    /// Chunk tag used when the record rides inside an `.st_bnk`.
    pub const TAG: [u8; 4] = *b"META";

    /// Parse a META chunk payload.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(payload);
        let integration_type = cursor.read_u8()?;
        let file_id = cursor.read_u64::<LittleEndian>()?;
        let mut xor = [0u8; 4];
        cursor.read_exact(&mut xor)?;
        let mut dependency = Vec::new();
        cursor.read_to_end(&mut dependency)?;
        Ok(Self {
            integration_type,
            file_id,
            xor,
            dependency,
        })
    }

    /// Encoded payload length, excluding the chunk frame.
    #[must_use]
    pub fn payload_size(&self) -> usize {
        13 + self.dependency.len()
    }

    /// Emit the record as a framed META chunk.
    pub fn to_chunk(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(8 + self.payload_size());
        out.extend_from_slice(&Self::TAG);
        out.write_u32::<LittleEndian>(self.payload_size() as u32)?;
        out.push(self.integration_type);
        out.write_u64::<LittleEndian>(self.file_id)?;
        out.extend_from_slice(&self.xor);
        out.extend_from_slice(&self.dependency);
        Ok(out)
    }

    /// The dependency's bank path, decoded from its payload. The
    /// length field counts the NUL terminator.
    pub fn dependency_path(&self) -> Result<String> {
        dependency_path(&self.dependency, self.file_id)
    }
}

/// Decode the NUL-terminated path string of a wwise-dependency payload.
pub fn dependency_path(payload: &[u8], file_id: u64) -> Result<String> {
    let strlen_bytes = payload
        .get(DEP_STRLEN_OFFSET..DEP_PATH_OFFSET)
        .ok_or(Error::EmptyDependencyPath { file_id })?;
    let str_len = u32::from_le_bytes([
        strlen_bytes[0],
        strlen_bytes[1],
        strlen_bytes[2],
        strlen_bytes[3],
    ]) as usize;
    if str_len < 2 {
        return Err(Error::EmptyDependencyPath { file_id });
    }
    let path = payload
        .get(DEP_PATH_OFFSET..DEP_PATH_OFFSET + str_len - 1)
        .ok_or(Error::EmptyDependencyPath { file_id })?;
    if path.is_empty() || path[0] == 0 {
        return Err(Error::EmptyDependencyPath { file_id });
    }
    Ok(String::from_utf8_lossy(path).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep_payload(path: &str) -> Vec<u8> {
        let mut payload = vec![0u8; DEP_STRLEN_OFFSET];
        payload.extend_from_slice(&((path.len() + 1) as u32).to_le_bytes());
        payload.extend_from_slice(path.as_bytes());
        payload.push(0);
        payload
    }

    #[test]
    fn asset_header_round_trip() {
        let header = AssetHeader {
            file_id: 12345,
            type_id: 0x535a_7bd3_e650_d799,
            data_offset: 304,
            data_size: 1024,
            index: 1,
            ..AssetHeader::default()
        };
        let mut bytes = Vec::new();
        header.write(&mut bytes).unwrap();
        assert_eq!(bytes.len(), AssetHeader::SIZE);
        let mut cursor = Cursor::new(bytes.as_slice());
        assert_eq!(AssetHeader::read(&mut cursor).unwrap(), header);
    }

    #[test]
    fn asset_data_bounds_checked() {
        let archive = vec![0u8; 100];
        let header = AssetHeader {
            file_id: 7,
            data_offset: 90,
            data_size: 20,
            ..AssetHeader::default()
        };
        assert!(matches!(
            header.data(&archive),
            Err(Error::AssetOutOfBounds { file_id: 7, .. })
        ));
    }

    #[test]
    fn meta_chunk_round_trip() {
        let meta = MetaRecord {
            integration_type: 1,
            file_id: 12345,
            xor: [0xDE, 0xAD, 0xBE, 0xEF],
            dependency: dep_payload("wwise/events/weapons"),
        };
        let chunk = meta.to_chunk().unwrap();
        assert_eq!(&chunk[..4], b"META");
        let size = u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]) as usize;
        assert_eq!(size, chunk.len() - 8);
        assert_eq!(MetaRecord::from_payload(&chunk[8..]).unwrap(), meta);
        assert_eq!(meta.dependency_path().unwrap(), "wwise/events/weapons");
    }

    #[test]
    fn empty_dependency_path_is_fatal() {
        let mut payload = vec![0u8; DEP_STRLEN_OFFSET];
        payload.extend_from_slice(&1u32.to_le_bytes()); // NUL only
        payload.push(0);
        assert!(matches!(
            dependency_path(&payload, 9),
            Err(Error::EmptyDependencyPath { file_id: 9 })
        ));
        assert!(matches!(
            dependency_path(&[], 9),
            Err(Error::EmptyDependencyPath { file_id: 9 })
        ));
    }
}
