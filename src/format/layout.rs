//! Table layout calculator (encode path).
//!
//! Urutan di file: header | index | key table | data table.
//! Key table di-pad sekali di akhir; setiap slot data di-pad sendiri-sendiri.

use crate::config::SlotPolicy;

use super::document::Entry;
use super::error::CodecError;
use super::header::HEADER_SIZE;
use super::index::{IndexRecord, INDEX_RECORD_SIZE};
use super::value::{encode_value, Format, Value};

/// Round up to the next multiple of 4.
#[inline(always)]
pub const fn align4(n: usize) -> usize {
    (n + 3) & !3
}

/// Computed tables for an ordered entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub records: Vec<IndexRecord>,
    pub key_table: Vec<u8>,
    pub data_table: Vec<u8>,
    pub key_table_offset: u32,
    pub data_table_offset: u32,
}

impl Layout {
    pub fn compute(entries: &[Entry], policy: SlotPolicy) -> Result<Self, CodecError> {
        let count = u32::try_from(entries.len())
            .map_err(|_| CodecError::too_large("entry count", entries.len(), u64::from(u32::MAX)))?;

        let mut records = Vec::with_capacity(entries.len());
        let mut key_table = Vec::new();
        // Nilai di-encode rapat dulu; slot reserved baru dialokasi setelah
        // ukuran total lolos cek u32.
        let mut packed = Vec::new();
        let mut slots = Vec::with_capacity(entries.len());
        let mut data_size: u64 = 0;

        for (i, entry) in entries.iter().enumerate() {
            check_value(i, entry)?;

            let key_offset = u16::try_from(key_table.len()).map_err(|_| {
                CodecError::too_large("key offset", key_table.len(), u64::from(u16::MAX))
            })?;
            key_table.extend_from_slice(entry.name.as_bytes());
            key_table.push(0);

            let data_offset = u32::try_from(data_size).map_err(|_| CodecError::DocumentTooLarge {
                field: "data offset",
                size: data_size,
                limit: u64::from(u32::MAX),
            })?;
            let start = packed.len();
            let (format, data_len) = encode_value(&entry.value, entry.format, &mut packed);
            let data_len = to_u32("data length", data_len)?;
            let max_len = entry.max_len.max(data_len);

            let mut slot = (packed.len() - start) as u64;
            if policy == SlotPolicy::Reserved {
                slot = slot.max((u64::from(max_len) + 3) & !3);
            }
            data_size += slot;
            slots.push((start..packed.len(), slot));

            records.push(IndexRecord {
                key_offset,
                format: format.as_u16(),
                data_len,
                max_len,
                data_offset,
            });
        }
        key_table.resize(align4(key_table.len()), 0);
        // Data table offset harus < panjang file selama ada entry
        if data_size == 0 && !entries.is_empty() {
            data_size = 4;
        }

        // u64 supaya overflow terdeteksi, bukan wrap
        let key_table_offset = HEADER_SIZE as u64 + u64::from(count) * INDEX_RECORD_SIZE as u64;
        let data_table_offset = key_table_offset + key_table.len() as u64;
        let total = data_table_offset + data_size;
        if total > u64::from(u32::MAX) {
            return Err(CodecError::DocumentTooLarge {
                field: "total size",
                size: total,
                limit: u64::from(u32::MAX),
            });
        }

        let data_table = if policy == SlotPolicy::Compact {
            packed.resize(data_size as usize, 0);
            packed
        } else {
            let mut table = Vec::with_capacity(data_size as usize);
            for (range, slot) in slots {
                let slot_end = table.len() + slot as usize;
                table.extend_from_slice(&packed[range]);
                table.resize(slot_end, 0);
            }
            table.resize(data_size as usize, 0);
            table
        };

        Ok(Self {
            records,
            key_table,
            data_table,
            key_table_offset: key_table_offset as u32,
            data_table_offset: data_table_offset as u32,
        })
    }

    /// Total encoded file size.
    #[inline]
    pub fn total_size(&self) -> usize {
        self.data_table_offset as usize + self.data_table.len()
    }
}

/// Values the decoder could not read back are rejected up front.
fn check_value(i: usize, entry: &Entry) -> Result<(), CodecError> {
    let reason = match &entry.value {
        Value::Text(s) if s.as_bytes().contains(&0) => "text contains a NUL byte",
        Value::Opaque { tag, .. } if !matches!(Format::from_u16(*tag), Format::Other(_)) => {
            "opaque value uses a recognized format tag"
        }
        _ => return Ok(()),
    };
    Err(CodecError::InvalidValue {
        entry: i,
        key: entry.name.clone(),
        reason,
    })
}

#[inline]
fn to_u32(field: &'static str, n: usize) -> Result<u32, CodecError> {
    u32::try_from(n).map_err(|_| CodecError::too_large(field, n, u64::from(u32::MAX)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align4() {
        assert_eq!(align4(0), 0);
        assert_eq!(align4(1), 4);
        assert_eq!(align4(4), 4);
        assert_eq!(align4(13), 16);
    }

    #[test]
    fn test_offsets() {
        let entries = vec![
            Entry::text("TITLE", "Sample Title"),
            Entry::text("CATEGORY", "DG"),
            Entry::integer("BOOTABLE", 1),
        ];
        let layout = Layout::compute(&entries, SlotPolicy::Compact).unwrap();

        // "TITLE\0" + "CATEGORY\0" + "BOOTABLE\0" = 24 bytes, already aligned
        assert_eq!(layout.key_table.len(), 24);
        assert_eq!(layout.key_table_offset, 20 + 3 * 16);
        assert_eq!(layout.data_table_offset, 68 + 24);

        let key_offsets: Vec<u16> = layout.records.iter().map(|r| r.key_offset).collect();
        assert_eq!(key_offsets, [0, 6, 15]);

        // "Sample Title\0" = 13 → slot 16, "DG\0" = 3 → slot 4
        let data_offsets: Vec<u32> = layout.records.iter().map(|r| r.data_offset).collect();
        assert_eq!(data_offsets, [0, 16, 20]);
        assert_eq!(layout.records[0].data_len, 13);
        assert_eq!(layout.data_table.len(), 24);
        assert_eq!(layout.total_size(), 92 + 24);
    }

    #[test]
    fn test_key_table_padded_at_end_only() {
        let entries = vec![Entry::integer("A", 0), Entry::integer("BC", 0)];
        let layout = Layout::compute(&entries, SlotPolicy::Compact).unwrap();
        assert_eq!(layout.key_table, b"A\0BC\0\0\0\0");
        assert_eq!(layout.records[1].key_offset, 2);
    }

    #[test]
    fn test_reserved_slots_use_max_len() {
        let entries = vec![
            Entry::text("TITLE", "Hi").with_max_len(128),
            Entry::integer("ATTRIBUTE", 7),
        ];
        let compact = Layout::compute(&entries, SlotPolicy::Compact).unwrap();
        let reserved = Layout::compute(&entries, SlotPolicy::Reserved).unwrap();

        assert_eq!(compact.records[1].data_offset, 4);
        assert_eq!(reserved.records[1].data_offset, 128);
        assert_eq!(reserved.records[0].max_len, 128);
        assert_eq!(reserved.records[0].data_len, 3);
    }

    #[test]
    fn test_empty_values_keep_data_table_in_file() {
        let entries = vec![Entry::opaque("EMPTY", 0x0999, Vec::new())];
        let layout = Layout::compute(&entries, SlotPolicy::Compact).unwrap();
        assert_eq!(layout.records[0].data_len, 0);
        assert_eq!(layout.data_table.len(), 4);
        assert!((layout.data_table_offset as usize) < layout.total_size());
    }

    #[test]
    fn test_reserved_overflow_is_error_not_allocation() {
        let entries = vec![
            Entry::integer("ATTRIBUTE", 0).with_max_len(0xF000_0000),
            Entry::integer("BOOTABLE", 1).with_max_len(0xF000_0000),
        ];
        assert!(matches!(
            Layout::compute(&entries, SlotPolicy::Reserved),
            Err(CodecError::DocumentTooLarge { .. })
        ));

        // Compact ignores max_len for sizing
        let layout = Layout::compute(&entries, SlotPolicy::Compact).unwrap();
        assert_eq!(layout.data_table.len(), 8);
        assert_eq!(layout.records[1].max_len, 0xF000_0000);
    }

    #[test]
    fn test_rejects_values_that_cannot_roundtrip() {
        let entries = vec![Entry::integer("OK", 1), Entry::text("T", "A\0B")];
        assert!(matches!(
            Layout::compute(&entries, SlotPolicy::Compact),
            Err(CodecError::InvalidValue { entry: 1, ref key, .. }) if key == "T"
        ));

        for tag in [0x0004, 0x0204, 0x0404] {
            let entries = vec![Entry::opaque("X", tag, vec![1])];
            assert!(matches!(
                Layout::compute(&entries, SlotPolicy::Compact),
                Err(CodecError::InvalidValue { entry: 0, .. })
            ));
        }
    }

    #[test]
    fn test_key_table_overflow() {
        let long_name = "K".repeat(40_000);
        let entries = vec![
            Entry::integer(long_name.clone(), 0),
            Entry::integer(long_name.clone(), 0),
            Entry::integer(long_name, 0),
        ];
        assert!(matches!(
            Layout::compute(&entries, SlotPolicy::Compact),
            Err(CodecError::DocumentTooLarge {
                field: "key offset",
                ..
            })
        ));
    }
}
