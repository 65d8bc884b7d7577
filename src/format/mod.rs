//! Format Layer: PARAM.SFO Binary Codec
//!
//! Prinsip desain:
//! - Fixed-size header + index: Predictable layout, offset-indexed tables
//! - Checked arithmetic: Setiap offset dari input divalidasi sebelum slicing
//! - Owned output: Document tidak menyimpan reference ke input buffer

mod codec;
mod document;
mod error;
mod header;
mod index;
mod layout;
mod value;


pub use codec::{decode, encode, Decoder, Encoder};
pub use document::{keys, Document, Entry};
pub use error::CodecError;
pub use header::{Header, HEADER_SIZE, MAGIC, VERSION};
pub use index::{IndexRecord, INDEX_RECORD_SIZE};
pub use layout::{align4, Layout};
pub use value::{decode_value, encode_value, Format, Value};
