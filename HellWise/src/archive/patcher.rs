//! Patch-archive generation
//!
//! The inverse of extraction: take an edited `.st_bnk`, peel off its
//! META side-record, re-apply the original obfuscation bytes, and emit
//! an archive-shaped patch file holding exactly the bank and its wwise
//! dependency.

use std::io::Write;
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::io::ByteReader;

use super::types::{AssetHeader, MetaRecord, TypeRecord};
use super::{
    ARCHIVE_MAGIC, OBFUSCATION_RANGE, PATCH_ENGINE_BLOB, PATCH_FILE_NAME, TYPE_WWISE_BANK,
    TYPE_WWISE_DEP,
};

/// Split an `.st_bnk` into the plain bank bytes and its META record.
///
/// The bank's chunk stream is re-emitted verbatim minus the META
/// chunk; a bank with no META record cannot be patched back.
pub fn split_meta(st_bnk: &[u8]) -> Result<(Vec<u8>, MetaRecord)> {
    let mut reader = ByteReader::new(st_bnk);
    let mut bank = Vec::with_capacity(st_bnk.len());
    let mut meta = None;

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
        if tag == MetaRecord::TAG {
            meta = Some(MetaRecord::from_payload(payload)?);
        } else {
            bank.extend_from_slice(&tag);
            bank.extend_from_slice(&(declared as u32).to_le_bytes());
            bank.extend_from_slice(payload);
        }
    }

    match meta {
        Some(meta) => Ok((bank, meta)),
        None => Err(Error::MissingMeta),
    }
}

fn align16(offset: usize) -> usize {
    (offset + 15) & !15
}

/// Fixed byte count before the data section: archive header, two type
/// records, two asset headers.
const TABLES_END: usize = 16 + PATCH_ENGINE_BLOB.len() + 2 * TypeRecord::SIZE + 2 * AssetHeader::SIZE;

/// Build the patch-archive bytes for one bank and its META record.
///
/// The bank payload gets the original obfuscation bytes restored at
/// the fixed window. Chunk payloads are length-prefixed and start on
/// 16-byte boundaries.
pub fn build_patch(bank: &[u8], meta: &MetaRecord) -> Result<Vec<u8>> {
    if bank.len() < OBFUSCATION_RANGE.end {
        return Err(Error::BankTooSmall {
            file_id: meta.file_id,
            len: bank.len(),
        });
    }
    let mut bank = bank.to_vec();
    bank[OBFUSCATION_RANGE].copy_from_slice(&meta.xor);

    // Lay out the two payloads before writing anything.
    let bank_start = align16(TABLES_END + 4);
    let bank_end = bank_start + bank.len();
    let dep_start = align16(bank_end + 4);
    let dep_end = dep_start + meta.dependency.len();

    let mut out = Vec::with_capacity(dep_end);
    out.write_u32::<LittleEndian>(ARCHIVE_MAGIC)?;
    out.write_u32::<LittleEndian>(2)?; // type count
    out.write_u32::<LittleEndian>(2)?; // file count
    out.write_u32::<LittleEndian>(0)?;
    out.extend_from_slice(&PATCH_ENGINE_BLOB);

    for type_id in [TYPE_WWISE_BANK, TYPE_WWISE_DEP] {
        TypeRecord {
            unknown: 0,
            type_id,
            count: 1,
            alignment: 16,
            unknown2: 0,
        }
        .write(&mut out)?;
    }

    let records = [
        (TYPE_WWISE_BANK, bank_start, bank.len(), 0u32),
        (TYPE_WWISE_DEP, dep_start, meta.dependency.len(), 1u32),
    ];
    for (type_id, offset, size, index) in records {
        AssetHeader {
            file_id: meta.file_id,
            type_id,
            data_offset: offset as u64,
            data_size: size as u32,
            index,
            ..AssetHeader::default()
        }
        .write(&mut out)?;
    }

    debug_assert_eq!(out.len(), TABLES_END);
    out.write_u32::<LittleEndian>(bank.len() as u32)?;
    out.resize(bank_start, 0);
    out.extend_from_slice(&bank);
    out.write_u32::<LittleEndian>(meta.dependency.len() as u32)?;
    out.resize(dep_start, 0);
    out.extend_from_slice(&meta.dependency);

    debug!(
        file_id = meta.file_id,
        bank_size = bank.len(),
        patch_size = out.len(),
        "built patch archive"
    );
    Ok(out)
}

/// Turn an edited `.st_bnk` into a patch archive on disk.
///
/// Returns the path of the written patch file, which always carries
/// the fixed patch name the game loads.
pub fn write_patch(st_bnk: &[u8], out_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;

    let (bank, meta) = split_meta(st_bnk)?;
    let patch = build_patch(&bank, &meta)?;

    let target = out_dir.join(PATCH_FILE_NAME);
    let mut temp = NamedTempFile::new_in(out_dir)?;
    temp.write_all(&patch)?;
    temp.persist(&target).map_err(|e| Error::Io(e.error))?;
    info!(file_id = meta.file_id, path = %target.display(), "wrote patch archive");
    Ok(target)
}

/// Read an `.st_bnk` file and write its patch archive.
pub fn patch_bank_file(bank_path: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let bytes = std::fs::read(bank_path.as_ref())?;
    write_patch(&bytes, out_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::BANK_MARKER;

    fn bank_bytes() -> Vec<u8> {
        let mut bank = Vec::new();
        bank.extend_from_slice(b"BKHD");
        bank.extend_from_slice(&20u32.to_le_bytes());
        bank.extend_from_slice(&BANK_MARKER);
        bank.extend_from_slice(&[0u8; 16]);
        bank
    }

    fn meta() -> MetaRecord {
        MetaRecord {
            integration_type: 1,
            file_id: 12345,
            xor: [0x11, 0x22, 0x33, 0x44],
            dependency: vec![0xAA; 50],
        }
    }

    #[test]
    fn split_meta_strips_only_the_meta_chunk() {
        let bank = bank_bytes();
        let mut st_bnk = bank.clone();
        st_bnk.extend_from_slice(&meta().to_chunk().unwrap());

        let (stripped, parsed) = split_meta(&st_bnk).unwrap();
        assert_eq!(stripped, bank);
        assert_eq!(parsed, meta());
    }

    #[test]
    fn missing_meta_is_fatal() {
        assert!(matches!(split_meta(&bank_bytes()), Err(Error::MissingMeta)));
    }

    #[test]
    fn build_patch_restores_obfuscation_bytes() {
        let patch = build_patch(&bank_bytes(), &meta()).unwrap();

        let bank_offset = u64::from_le_bytes(patch[152..160].try_into().unwrap()) as usize;
        assert_eq!(bank_offset % 16, 0);
        assert_eq!(
            &patch[bank_offset + OBFUSCATION_RANGE.start..bank_offset + OBFUSCATION_RANGE.end],
            &[0x11, 0x22, 0x33, 0x44]
        );
        // Length prefix sits right before the aligned payload start.
        let prefix =
            u32::from_le_bytes(patch[TABLES_END..TABLES_END + 4].try_into().unwrap()) as usize;
        assert_eq!(prefix, bank_bytes().len());
    }
}
