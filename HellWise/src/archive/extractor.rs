//! Archive parsing and sound-bank extraction
//!
//! The header table is walked sequentially to correlate sound banks
//! with their wwise dependencies by file id; the per-pair file writes
//! then fan out onto the rayon pool. Duplicate file ids are fatal and
//! detected before any fan-out. Output files are written through a
//! named temporary file and persisted, so a failed worker never leaves
//! a half-written `.st_bnk` behind.

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};
use rayon::prelude::*;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::types::{dependency_path, AssetHeader, MetaRecord, TypeRecord};
use super::{
    ARCHIVE_MAGIC, BANK_MARKER, ENGINE_BLOB_SIZE, OBFUSCATION_RANGE, TYPE_WWISE_BANK,
    TYPE_WWISE_DEP,
};

/// A fully parsed archive: header fields plus both tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArchive {
    pub unknown: u32,
    /// Opaque, externally mandated engine blob, copied verbatim into
    /// patches.
    pub engine_blob: [u8; ENGINE_BLOB_SIZE],
    pub types: Vec<TypeRecord>,
    pub assets: Vec<AssetHeader>,
}

/// Parse the archive header, type table and asset-header table.
pub fn parse_archive(bytes: &[u8]) -> Result<ParsedArchive> {
    let mut cursor = Cursor::new(bytes);
    let magic = cursor.read_u32::<LittleEndian>()?;
    if magic != ARCHIVE_MAGIC {
        return Err(Error::InvalidArchiveMagic { found: magic });
    }
    let num_types = cursor.read_u32::<LittleEndian>()? as usize;
    let num_files = cursor.read_u32::<LittleEndian>()? as usize;
    let unknown = cursor.read_u32::<LittleEndian>()?;
    let mut engine_blob = [0u8; ENGINE_BLOB_SIZE];
    cursor.read_exact(&mut engine_blob)?;

    let mut types = Vec::with_capacity(num_types);
    for _ in 0..num_types {
        types.push(TypeRecord::read(&mut cursor)?);
    }
    let mut assets = Vec::with_capacity(num_files);
    for _ in 0..num_files {
        assets.push(AssetHeader::read(&mut cursor)?);
    }
    debug!(num_types, num_files, "parsed archive tables");
    Ok(ParsedArchive {
        unknown,
        engine_blob,
        types,
        assets,
    })
}

/// One extracted sound bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBank {
    pub file_id: u64,
    /// The wwise project path from the correlated dependency.
    pub bank_path: String,
    /// Where the `.st_bnk` landed on disk.
    pub output: PathBuf,
}

/// Correlate banks and dependencies by file id, write-once per key.
fn correlate(
    archive: &ParsedArchive,
) -> Result<(HashMap<u64, AssetHeader>, HashMap<u64, AssetHeader>)> {
    let mut banks = HashMap::new();
    let mut deps = HashMap::new();
    for asset in &archive.assets {
        let map = match asset.type_id {
            TYPE_WWISE_BANK => &mut banks,
            TYPE_WWISE_DEP => &mut deps,
            _ => continue,
        };
        if map.insert(asset.file_id, *asset).is_some() {
            return Err(Error::DuplicateFileId {
                file_id: asset.file_id,
            });
        }
    }
    Ok((banks, deps))
}

/// Build the `.st_bnk` bytes for one bank/dependency pair: the bank
/// payload with the plaintext marker restored, plus a META chunk
/// recording the original obfuscation bytes and the dependency payload.
fn build_st_bnk(bank: &AssetHeader, dep_data: &[u8], bank_data: &[u8]) -> Result<Vec<u8>> {
    if bank_data.len() < OBFUSCATION_RANGE.end {
        return Err(Error::BankTooSmall {
            file_id: bank.file_id,
            len: bank_data.len(),
        });
    }
    let mut xor = [0u8; 4];
    xor.copy_from_slice(&bank_data[OBFUSCATION_RANGE]);

    let meta = MetaRecord {
        integration_type: 1,
        file_id: bank.file_id,
        xor,
        dependency: dep_data.to_vec(),
    };
    let meta_chunk = meta.to_chunk()?;

    let mut out = Vec::with_capacity(bank_data.len() + meta_chunk.len());
    out.extend_from_slice(bank_data);
    out[OBFUSCATION_RANGE].copy_from_slice(&BANK_MARKER);
    out.extend_from_slice(&meta_chunk);
    Ok(out)
}

fn write_output(out_dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let target = out_dir.join(name);
    let mut temp = NamedTempFile::new_in(out_dir)?;
    temp.write_all(bytes)?;
    temp.persist(&target).map_err(|e| Error::Io(e.error))?;
    Ok(target)
}

/// Extract every sound-bank/dependency pair of an archive into
/// `out_dir`, one de-obfuscated `.st_bnk` per pair.
pub fn extract_archive_bytes(bytes: &[u8], out_dir: impl AsRef<Path>) -> Result<Vec<ExtractedBank>> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;

    let archive = parse_archive(bytes)?;
    let (banks, deps) = correlate(&archive)?;

    let mut pairs: Vec<(AssetHeader, AssetHeader)> = Vec::with_capacity(banks.len());
    for (file_id, bank) in &banks {
        let dep = deps
            .get(file_id)
            .ok_or(Error::MissingDependency { file_id: *file_id })?;
        pairs.push((*bank, *dep));
    }
    // Deterministic output order regardless of map iteration.
    pairs.sort_by_key(|(bank, _)| bank.file_id);

    let extracted = pairs
        .par_iter()
        .map(|(bank, dep)| {
            let dep_data = dep.data(bytes)?;
            let bank_path = dependency_path(dep_data, bank.file_id)?;
            let bank_data = bank.data(bytes)?;
            let st_bnk = build_st_bnk(bank, dep_data, bank_data)?;
            let output = write_output(out_dir, &format!("{:016x}.st_bnk", bank.file_id), &st_bnk)?;
            debug!(file_id = bank.file_id, path = %output.display(), "extracted sound bank");
            Ok(ExtractedBank {
                file_id: bank.file_id,
                bank_path,
                output,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(count = extracted.len(), "archive extraction complete");
    Ok(extracted)
}

/// Read an archive file and extract its sound banks.
pub fn extract_archive(path: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<Vec<ExtractedBank>> {
    let bytes = std::fs::read(path.as_ref())?;
    extract_archive_bytes(&bytes, out_dir)
}
