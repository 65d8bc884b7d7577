//! Error types untuk codec PARAM.SFO.

use thiserror::Error;

/// Errors that can occur while decoding or encoding a PARAM.SFO buffer.
///
/// Semua error bersifat terminal: tidak ada partial document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The first bytes are not the `\0PSF` signature.
    #[error("invalid magic: expected 00 50 53 46, found {found:02X?}")]
    InvalidMagic {
        /// The bytes found at offset 0 (at most 4).
        found: Vec<u8>,
    },

    /// The buffer is shorter than the fixed 20-byte header.
    #[error("truncated header: need {required} bytes, buffer has {len}")]
    TruncatedHeader { required: usize, len: usize },

    /// A header table offset points past the buffer.
    #[error("{field} offset {offset} out of range for buffer of {len} bytes")]
    OffsetOutOfRange {
        field: &'static str,
        offset: u32,
        len: usize,
    },

    /// The index table implied by the entry count does not fit.
    #[error("truncated index: {entries} entries need {required} bytes, buffer has {len}")]
    TruncatedIndex {
        entries: u32,
        required: u64,
        len: usize,
    },

    /// No NUL terminator between a key's start and the end of the buffer.
    #[error("entry {entry}: key at byte {offset} is not NUL-terminated")]
    UnterminatedKey { entry: usize, offset: u64 },

    /// An entry's value range is not contained in the buffer.
    #[error("entry {entry} ({key}): value bytes {start}..{end} out of bounds for buffer of {len} bytes")]
    ValueOutOfBounds {
        entry: usize,
        key: String,
        start: u64,
        end: u64,
        len: usize,
    },

    /// An int32 value has fewer than 4 data bytes.
    #[error("invalid integer data at byte {offset}: {len} bytes, need 4")]
    InvalidIntegerData { offset: u64, len: usize },

    /// An entry's value would not decode back to itself.
    #[error("entry {entry} ({key}): {reason}")]
    InvalidValue {
        entry: usize,
        key: String,
        reason: &'static str,
    },

    /// A document does not fit the fixed-width fields of the format.
    #[error("document too large: {field} is {size}, limit {limit}")]
    DocumentTooLarge {
        field: &'static str,
        size: u64,
        limit: u64,
    },
}

impl CodecError {
    /// Rebase a value-level error onto its absolute position in the buffer.
    pub(crate) fn at(self, base: u64) -> Self {
        match self {
            Self::InvalidIntegerData { offset, len } => Self::InvalidIntegerData {
                offset: base + offset,
                len,
            },
            other => other,
        }
    }

    pub(crate) fn too_large(field: &'static str, size: usize, limit: u64) -> Self {
        Self::DocumentTooLarge {
            field,
            size: size as u64,
            limit,
        }
    }
}
