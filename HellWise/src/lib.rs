//! # HellWise
//!
//! A pure-Rust library for editing Wwise SoundBanks inside Helldivers 2
//! game archives.
//!
//! ## Supported Formats
//!
//! - **SoundBanks** (`.bnk`/`.st_bnk`) - Parse, edit, and re-encode the
//!   chunk container, media index, and hierarchy object graph
//! - **Hierarchy objects** - Sounds, containers, buses, events,
//!   attenuations, effects, and interactive-music nodes
//! - **Property bundles** - Version-aware property editing across bank
//!   format revisions
//! - **Helldivers 2 archives** - Extract sound banks with their wwise
//!   dependencies, and generate loadable patch archives
//!
//! ## Quick Start
//!
//! ### Editing a SoundBank
//!
//! ```no_run
//! use hellwise::wwise::bank::{read_bank, write_bank};
//!
//! // Parse a bank, swap one sound's audio, re-encode
//! let mut bank = read_bank("content_audio.st_bnk")?;
//! bank.append_audio(26007159, &std::fs::read("new_shot.wem")?)?;
//! bank.set_sound_source(0x2C85_1A3B, 26007159)?;
//! write_bank(&bank, "content_audio.st_bnk")?;
//! # Ok::<(), hellwise::Error>(())
//! ```
//!
//! ### Archive Round Trip
//!
//! ```no_run
//! use hellwise::archive::{extract_archive, patch_bank_file};
//!
//! // Pull every sound bank out of a game archive
//! let banks = extract_archive("9ba626afa44a3aa3", "extracted/")?;
//! println!("extracted {} banks", banks.len());
//!
//! // After editing, emit a patch the game loads over the original
//! patch_bank_file(&banks[0].output, "patches/")?;
//! # Ok::<(), hellwise::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use hellwise::prelude::*;
//!
//! // Now you have access to:
//! // - SoundBank, HircCollection, HircObject, HierarchyTree
//! // - PropBundle, Property
//! // - extract_archive, write_patch
//! // - Error, Result, and more
//! ```

pub mod archive;
pub mod error;
pub mod io;
pub mod wwise;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    // SoundBank container
    pub use crate::wwise::bank::{
        encode_bank, parse_bank_bytes, read_bank, write_bank, BankHeader, MediaEntry, SoundBank,
    };

    // Hierarchy object graph
    pub use crate::wwise::hierarchy::{
        BaseParameter, HierarchyTree, HircCollection, HircKind, HircObject, RanSeqCntr, Sound,
    };

    // Property editing
    pub use crate::wwise::props::{PropBundle, Property, RangePropBundle};

    // Archive integration
    pub use crate::archive::{
        extract_archive, extract_archive_bytes, patch_bank_file, write_patch, ExtractedBank,
        MetaRecord,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
