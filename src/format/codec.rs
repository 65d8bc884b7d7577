//! Encoder/Decoder untuk dokumen PARAM.SFO.
//!
//! Decode: header → index → resolve key + value per record.
//! Encode: layout → header | index | key table | data table.

use tracing::{debug, trace};

use crate::config::EncodeConfig;

use super::document::{Document, Entry};
use super::error::CodecError;
use super::header::Header;
use super::index::IndexRecord;
use super::layout::Layout;
use super::value::{decode_value, Format};

/// Decode a complete PARAM.SFO buffer.
pub fn decode(buf: &[u8]) -> Result<Document, CodecError> {
    Decoder::new(buf)?.into_document()
}

/// Encode a document with the default configuration.
pub fn encode(doc: &Document) -> Result<Vec<u8>, CodecError> {
    let mut encoder = Encoder::new(EncodeConfig::default());
    encoder.encode(doc)?;
    Ok(encoder.into_bytes())
}

/// Reusable encoder
///
/// Buffer internal dipakai ulang antar encode; `reset` mengosongkannya
/// tanpa melepas kapasitas.
pub struct Encoder {
    buffer: Vec<u8>,
    config: EncodeConfig,
}

impl Encoder {
    pub fn new(config: EncodeConfig) -> Self {
        Self {
            buffer: Vec::with_capacity(config.initial_capacity),
            config,
        }
    }

    /// Reset encoder untuk reuse
    #[inline(always)]
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Encode `doc`, replacing any previous content.
    ///
    /// Offsets selalu dihitung ulang dari layout, bukan dari nilai hasil
    /// decode sebelumnya.
    pub fn encode(&mut self, doc: &Document) -> Result<&[u8], CodecError> {
        self.buffer.clear();

        let layout = Layout::compute(doc.entries(), self.config.slot_policy)?;
        let header = Header {
            version: self.config.version.unwrap_or(doc.version),
            key_table_offset: layout.key_table_offset,
            data_table_offset: layout.data_table_offset,
            // Layout already rejected counts above u32::MAX
            entry_count: layout.records.len() as u32,
        };

        self.buffer.reserve(layout.total_size());
        self.buffer.extend_from_slice(&header.encode());
        IndexRecord::encode_all(&layout.records, &mut self.buffer);
        self.buffer.extend_from_slice(&layout.key_table);
        self.buffer.extend_from_slice(&layout.data_table);

        debug!(
            entries = header.entry_count,
            key_table = header.key_table_offset,
            data_table = header.data_table_offset,
            size = self.buffer.len(),
            "encoded PARAM.SFO"
        );

        Ok(&self.buffer)
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// Decoder over a borrowed buffer.
///
/// Header dan index record diparse di `new`; `into_document` me-resolve
/// key dan value. Document hasilnya tidak meminjam buffer.
pub struct Decoder<'a> {
    buffer: &'a [u8],
    header: Header,
    records: Vec<IndexRecord>,
}

impl<'a> Decoder<'a> {
    pub fn new(buffer: &'a [u8]) -> Result<Self, CodecError> {
        let header = Header::decode(buffer)?;
        let records = IndexRecord::decode_all(buffer, &header)?;
        trace!(
            entries = header.entry_count,
            key_table = header.key_table_offset,
            data_table = header.data_table_offset,
            "parsed PARAM.SFO header"
        );
        Ok(Self {
            buffer,
            header,
            records,
        })
    }

    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[inline]
    pub fn records(&self) -> &[IndexRecord] {
        &self.records
    }

    /// Resolve every index record into an entry, in record order.
    pub fn into_document(self) -> Result<Document, CodecError> {
        let entries = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| self.resolve(i, record))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(entries = entries.len(), size = self.buffer.len(), "decoded PARAM.SFO");
        Ok(Document::from_entries(self.header.version, entries))
    }

    fn resolve(&self, i: usize, record: &IndexRecord) -> Result<Entry, CodecError> {
        let name = self.read_key(i, record)?;

        let start = u64::from(self.header.data_table_offset) + u64::from(record.data_offset);
        let end = start + u64::from(record.data_len);
        if end > self.buffer.len() as u64 {
            return Err(CodecError::ValueOutOfBounds {
                entry: i,
                key: name,
                start,
                end,
                len: self.buffer.len(),
            });
        }

        let format = Format::from_u16(record.format);
        let raw = &self.buffer[start as usize..end as usize];
        let value = decode_value(format, raw).map_err(|err| err.at(start))?;

        Ok(Entry {
            name,
            value,
            format,
            data_len: record.data_len,
            max_len: record.max_len,
        })
    }

    fn read_key(&self, i: usize, record: &IndexRecord) -> Result<String, CodecError> {
        let start = u64::from(self.header.key_table_offset) + u64::from(record.key_offset);
        let unterminated = CodecError::UnterminatedKey {
            entry: i,
            offset: start,
        };
        if start >= self.buffer.len() as u64 {
            return Err(unterminated);
        }

        let tail = &self.buffer[start as usize..];
        let len = tail.iter().position(|&b| b == 0).ok_or(unterminated)?;
        Ok(String::from_utf8_lossy(&tail[..len]).into_owned())
    }
}
