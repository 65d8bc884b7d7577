//! PARAM.SFO Header (20 bytes, fixed)
//!
//! Layout (little-endian):
//! ┌────────┬──────┬──────────────────────────┐
//! │ Offset │ Size │ Field                    │
//! ├────────┼──────┼──────────────────────────┤
//! │ 0      │ 4    │ Magic "\0PSF"            │
//! │ 4      │ 4    │ Format version           │
//! │ 8      │ 4    │ Key table offset         │
//! │ 12     │ 4    │ Data table offset        │
//! │ 16     │ 4    │ Entry count              │
//! └────────┴──────┴──────────────────────────┘

use serde::Serialize;

use super::error::CodecError;

pub const HEADER_SIZE: usize = 20;
pub const MAGIC: [u8; 4] = *b"\0PSF";
/// Versi yang ditulis oleh kebanyakan producer (1.1).
pub const VERSION: u32 = 0x0000_0101;

/// Decoded header fields (magic sudah divalidasi, tidak disimpan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub version: u32,
    pub key_table_offset: u32,
    pub data_table_offset: u32,
    pub entry_count: u32,
}

impl Header {
    /// Parse header dari awal buffer.
    ///
    /// Urutan validasi: magic, panjang header, lalu offset tabel.
    pub fn decode(buf: &[u8]) -> Result<Self, CodecError> {
        let seen = &buf[..buf.len().min(MAGIC.len())];
        if seen != &MAGIC[..seen.len()] {
            return Err(CodecError::InvalidMagic {
                found: seen.to_vec(),
            });
        }
        if buf.len() < HEADER_SIZE {
            return Err(CodecError::TruncatedHeader {
                required: HEADER_SIZE,
                len: buf.len(),
            });
        }

        let header = Self {
            version: read_u32(buf, 4),
            key_table_offset: read_u32(buf, 8),
            data_table_offset: read_u32(buf, 12),
            entry_count: read_u32(buf, 16),
        };

        header.check_offset("key table", header.key_table_offset, buf.len())?;
        header.check_offset("data table", header.data_table_offset, buf.len())?;

        Ok(header)
    }

    /// Serialize ke 20 bytes.
    #[inline]
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&MAGIC);
        out[4..8].copy_from_slice(&self.version.to_le_bytes());
        out[8..12].copy_from_slice(&self.key_table_offset.to_le_bytes());
        out[12..16].copy_from_slice(&self.data_table_offset.to_le_bytes());
        out[16..20].copy_from_slice(&self.entry_count.to_le_bytes());
        out
    }

    /// Version as `minor.major` bytes, e.g. `0x0101` → `"1.1"`.
    pub fn version_string(&self) -> String {
        format!("{}.{}", self.version & 0xFF, (self.version >> 8) & 0xFF)
    }

    // An empty file legally points both tables at its end.
    fn check_offset(&self, field: &'static str, offset: u32, len: usize) -> Result<(), CodecError> {
        let offset_usize = offset as usize;
        let out_of_range = offset_usize > len || (offset_usize == len && self.entry_count > 0);
        if out_of_range {
            return Err(CodecError::OffsetOutOfRange { field, offset, len });
        }
        Ok(())
    }
}

/// Read a little-endian u32. Caller guarantees `pos + 4 <= buf.len()`.
#[inline(always)]
pub(crate) fn read_u32(buf: &[u8], pos: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&buf[pos..pos + 4]);
    u32::from_le_bytes(raw)
}
