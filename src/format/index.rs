//! Index Records (16 bytes per entry)
//!
//! Layout:
//! `[key_offset: u16][format: u16][data_len: u32][max_len: u32][data_offset: u32]`
//!
//! Record dibaca apa adanya. Validasi offset dilakukan oleh assembler,
//! yang tahu batas key table dan data table.

use super::error::CodecError;
use super::header::{read_u32, Header, HEADER_SIZE};

pub const INDEX_RECORD_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRecord {
    /// Relative to the key table start.
    pub key_offset: u16,
    /// Raw format tag.
    pub format: u16,
    pub data_len: u32,
    /// Reserved slot size, `>= data_len` in files we write.
    pub max_len: u32,
    /// Relative to the data table start.
    pub data_offset: u32,
}

impl IndexRecord {
    #[inline(always)]
    fn read(buf: &[u8], pos: usize) -> Self {
        Self {
            key_offset: u16::from_le_bytes([buf[pos], buf[pos + 1]]),
            format: u16::from_le_bytes([buf[pos + 2], buf[pos + 3]]),
            data_len: read_u32(buf, pos + 4),
            max_len: read_u32(buf, pos + 8),
            data_offset: read_u32(buf, pos + 12),
        }
    }

    #[inline]
    pub fn encode_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.key_offset.to_le_bytes());
        buf.extend_from_slice(&self.format.to_le_bytes());
        buf.extend_from_slice(&self.data_len.to_le_bytes());
        buf.extend_from_slice(&self.max_len.to_le_bytes());
        buf.extend_from_slice(&self.data_offset.to_le_bytes());
    }

    /// Read `header.entry_count` records starting right after the header.
    ///
    /// Batas index table dicek sekali (u64) sebelum alokasi, jadi entry
    /// count patologis tidak memicu alokasi besar.
    pub fn decode_all(buf: &[u8], header: &Header) -> Result<Vec<Self>, CodecError> {
        let count = header.entry_count;
        let required = HEADER_SIZE as u64 + u64::from(count) * INDEX_RECORD_SIZE as u64;
        if required > buf.len() as u64 {
            return Err(CodecError::TruncatedIndex {
                entries: count,
                required,
                len: buf.len(),
            });
        }

        let records = buf[HEADER_SIZE..required as usize]
            .chunks_exact(INDEX_RECORD_SIZE)
            .map(|chunk| Self::read(chunk, 0))
            .collect();
        Ok(records)
    }

    pub fn encode_all(records: &[Self], buf: &mut Vec<u8>) {
        buf.reserve(records.len() * INDEX_RECORD_SIZE);
        for record in records {
            record.encode_to(buf);
        }
    }
}
