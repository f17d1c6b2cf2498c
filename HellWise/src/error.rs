//! Error types for `HellWise`

use thiserror::Error;

/// The error type for `HellWise` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A read ran past the end of the input buffer.
    #[error("unexpected end of data at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Byte offset of the failed read.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes left in the buffer.
        remaining: usize,
    },

    // ==================== SoundBank Format Errors ====================
    /// The file is not a valid SoundBank (first chunk is not BKHD).
    #[error("invalid SoundBank: expected BKHD chunk, found {tag:?}")]
    InvalidBankMagic {
        /// The tag found where BKHD was expected.
        tag: [u8; 4],
    },

    /// A chunk's declared length runs past the end of the bank.
    #[error("truncated chunk {}: declared {declared} bytes, {available} available", tag_name(.tag))]
    TruncatedChunk {
        /// The chunk tag.
        tag: [u8; 4],
        /// The declared payload length.
        declared: usize,
        /// The bytes actually available.
        available: usize,
    },

    /// The same known chunk appears more than once in a bank.
    #[error("duplicate {} chunk", tag_name(.tag))]
    DuplicateChunk {
        /// The repeated chunk tag.
        tag: [u8; 4],
    },

    /// A chunk payload did not have the expected shape.
    #[error("malformed {} chunk: {message}", tag_name(.tag))]
    MalformedChunk {
        /// The chunk tag.
        tag: [u8; 4],
        /// What was wrong with it.
        message: String,
    },

    /// A hierarchy object payload did not decode cleanly.
    #[error("malformed hierarchy object {id:#010x} ({kind}): {message}")]
    MalformedObject {
        /// The object id.
        id: u32,
        /// Human-readable kind name.
        kind: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// No hierarchy object with the requested id exists.
    #[error("hierarchy object {id:#010x} not found")]
    ObjectNotFound {
        /// The missing object id.
        id: u32,
    },

    /// The object has no id field (raw payload shorter than 4 bytes).
    #[error("hierarchy object of kind {tag:#04x} carries no id")]
    ObjectWithoutId {
        /// The raw kind tag.
        tag: u8,
    },

    /// An audio source id is already present in the media index.
    #[error("duplicate audio source id {source_id}")]
    DuplicateSourceId {
        /// The colliding source id.
        source_id: u32,
    },

    /// No media-index record exists for the requested source id.
    #[error("audio source {source_id} not found in media index")]
    SourceNotFound {
        /// The missing source id.
        source_id: u32,
    },

    // ==================== Property Translation Errors ====================
    /// The bank version has no property translation table.
    #[error("unsupported SoundBank version {version} for property translation")]
    UnsupportedBankVersion {
        /// The bank's format version.
        version: u32,
    },

    /// The semantic property does not exist in this version's table.
    #[error("property {property} has no code in version {version}")]
    UnknownProperty {
        /// Name of the semantic property.
        property: &'static str,
        /// The bank's format version.
        version: u32,
    },

    /// The on-disk property code does not exist in this version's table.
    #[error("property code {code:#04x} is not known in version {version}")]
    UnknownPropertyCode {
        /// The on-disk property byte.
        code: u8,
        /// The bank's format version.
        version: u32,
    },

    /// The property is not in the legal set for this bundle helper.
    #[error("property {property} is not a valid {role} property")]
    PropertyNotAllowed {
        /// Name of the semantic property.
        property: &'static str,
        /// The helper's role ("base" or "user aux send").
        role: &'static str,
    },

    // ==================== Invariant Violations ====================
    // Structural bugs: a size computation disagreed with the actual
    // encoding, or an id collided inside a unique scope. No partial
    // output is valid after one of these.
    /// An encoder produced a different byte count than its size function.
    #[error("size mismatch in {what}: computed {expected} bytes, encoded {actual}")]
    SizeMismatch {
        /// What was being encoded.
        what: &'static str,
        /// The computed size.
        expected: usize,
        /// The number of bytes actually written.
        actual: usize,
    },

    /// A bounded write ran past the writer's fixed capacity.
    #[error("writer overflow in {what}: write of {needed} bytes at position {position} exceeds capacity {capacity}")]
    WriterOverflow {
        /// What was being encoded.
        what: &'static str,
        /// Write position at the time of the overflow.
        position: usize,
        /// Size of the failed write.
        needed: usize,
        /// The writer's fixed capacity.
        capacity: usize,
    },

    // ==================== Hierarchy Contract Errors ====================
    // Caller-contract violations on leaf mutation. These indicate a bug
    // in the caller, not a malformed bank.
    /// The object is not a container kind.
    #[error("hierarchy object {id:#010x} ({kind}) is not a container")]
    NotAContainer {
        /// The object id.
        id: u32,
        /// Human-readable kind name.
        kind: &'static str,
    },

    /// The container kind does not support leaf mutation yet.
    #[error("leaf mutation is not supported for {kind} containers")]
    LeafMutationUnsupported {
        /// Human-readable kind name.
        kind: &'static str,
    },

    /// The object kind carries no base parameters and cannot be parented.
    #[error("hierarchy object {id:#010x} ({kind}) has no base parameters")]
    NoBaseParameters {
        /// The object id.
        id: u32,
        /// Human-readable kind name.
        kind: &'static str,
    },

    /// The child already has a parent and cannot be added again.
    #[error("object {child:#010x} is already parented to {parent:#010x}")]
    AlreadyParented {
        /// The child object id.
        child: u32,
        /// Its current parent id.
        parent: u32,
    },

    /// The child id is already listed in the container.
    #[error("object {child:#010x} is already a child of container {container:#010x}")]
    DuplicateChild {
        /// The child object id.
        child: u32,
        /// The container object id.
        container: u32,
    },

    /// The child id is not listed in the container.
    #[error("object {child:#010x} is not a child of container {container:#010x}")]
    NotAChild {
        /// The child object id.
        child: u32,
        /// The container object id.
        container: u32,
    },

    /// The playlist already holds an item for this child.
    #[error("playlist of container {container:#010x} already holds item {child:#010x}")]
    PlaylistItemExists {
        /// The child object id.
        child: u32,
        /// The container object id.
        container: u32,
    },

    /// No playlist item references this child.
    #[error("playlist of container {container:#010x} has no item {child:#010x}")]
    PlaylistItemNotFound {
        /// The child object id.
        child: u32,
        /// The container object id.
        container: u32,
    },

    // ==================== Archive Errors ====================
    /// The file is not a valid Helldivers 2 archive.
    #[error("invalid archive magic: {found:#010x}")]
    InvalidArchiveMagic {
        /// The magic value found.
        found: u32,
    },

    /// Two asset records of the same type share a file id.
    #[error("duplicate file id {file_id:#018x} in archive")]
    DuplicateFileId {
        /// The colliding file id.
        file_id: u64,
    },

    /// A sound bank has no correlated wwise dependency record.
    #[error("no wwise dependency for sound bank {file_id:#018x}")]
    MissingDependency {
        /// The bank's file id.
        file_id: u64,
    },

    /// The correlated dependency's path is empty.
    #[error("wwise dependency for {file_id:#018x} has an empty path")]
    EmptyDependencyPath {
        /// The bank's file id.
        file_id: u64,
    },

    /// An asset's data region runs past the end of the archive.
    #[error("asset {file_id:#018x} data out of bounds: offset {offset}, size {size}, archive is {archive_len} bytes")]
    AssetOutOfBounds {
        /// The asset's file id.
        file_id: u64,
        /// The declared data offset.
        offset: u64,
        /// The declared data size.
        size: u64,
        /// The archive length.
        archive_len: usize,
    },

    /// A bank payload is too small to carry the obfuscation window.
    #[error("sound bank {file_id:#018x} payload too small: {len} bytes")]
    BankTooSmall {
        /// The asset's file id.
        file_id: u64,
        /// The payload length.
        len: usize,
    },

    /// The bank carries no META record, so it cannot be re-injected.
    #[error("no META record found in bank data")]
    MissingMeta,
}

/// Render a chunk tag for error messages, falling back to hex for
/// non-ASCII tags.
fn tag_name(tag: &[u8; 4]) -> String {
    if tag.iter().all(|b| b.is_ascii_graphic()) {
        String::from_utf8_lossy(tag).into_owned()
    } else {
        format!("{tag:02x?}")
    }
}

/// A specialized Result type for `HellWise` operations.
pub type Result<T> = std::result::Result<T, Error>;
