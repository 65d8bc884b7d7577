//! paramsfo - PARAM.SFO Codec
//!
//! Arsitektur:
//! - Format: header | index | key table | data table, little-endian
//! - Checked: Semua offset dari input divalidasi, error bertipe (bukan panic)
//! - Owned: Document meng-copy data, tidak meminjam buffer input
//! - Storage: File dibaca/ditulis lewat mmap
//!
//! ```
//! use paramsfo::format::{decode, encode, Document, Entry};
//!
//! let doc = Document::new(0x0101)
//!     .with_entry(Entry::text("TITLE", "Sample Title"))
//!     .with_entry(Entry::text("CATEGORY", "DG"));
//!
//! let bytes = encode(&doc).unwrap();
//! let decoded = decode(&bytes).unwrap();
//! assert_eq!(decoded.get_text("TITLE"), Some("Sample Title"));
//! ```

pub mod config;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod report;
pub mod storage;

pub use config::{EncodeConfig, SlotPolicy};
pub use error::{Error, Result};
pub use format::{decode, encode, CodecError, Document, Entry, Value};
