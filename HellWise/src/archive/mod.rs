//! Helldivers 2 archive integration: sound-bank extraction and patch
//! generation
//!
//! Archives pair each wwise sound bank with a wwise-dependency record
//! carrying the bank's project path, correlated by file id. Extraction
//! de-obfuscates the bank header and stashes everything patching needs
//! in a META side-record appended to the `.st_bnk`; patching reverses
//! the whole trip.

use std::ops::Range;

pub mod extractor;
pub mod patcher;
pub mod types;

/// Archive container magic.
pub const ARCHIVE_MAGIC: u32 = 0xF000_0011;

/// Type id of wwise sound-bank assets.
pub const TYPE_WWISE_BANK: u64 = 0x535a_7bd3_e650_d799;

/// Type id of wwise-dependency assets.
pub const TYPE_WWISE_DEP: u64 = 0xaf32_095c_82f2_b070;

/// Byte window of the obfuscated bank-header field.
pub const OBFUSCATION_RANGE: Range<usize> = 0x08..0x0C;

/// Plaintext restored at the obfuscation window on extraction: the
/// little-endian bank format version.
pub const BANK_MARKER: [u8; 4] = [0x8D, 0, 0, 0];

/// Length of the opaque engine blob in the archive header.
pub const ENGINE_BLOB_SIZE: usize = 56;

/// Engine blob written into generated patches. Externally mandated,
/// opaque data.
pub const PATCH_ENGINE_BLOB: [u8; ENGINE_BLOB_SIZE] = [0; ENGINE_BLOB_SIZE];

/// File name the game loads patch archives under.
pub const PATCH_FILE_NAME: &str = "9ba626afa44a3aa3.patch_0";

/// Offset of the path-length field inside a wwise-dependency payload.
pub const DEP_STRLEN_OFFSET: usize = 40;

/// Offset of the NUL-terminated path inside a wwise-dependency payload.
pub const DEP_PATH_OFFSET: usize = 44;

pub use extractor::{extract_archive, extract_archive_bytes, parse_archive, ExtractedBank, ParsedArchive};
pub use patcher::{build_patch, patch_bank_file, split_meta, write_patch};
pub use types::{AssetHeader, MetaRecord, TypeRecord};
