//! Primitive value codec.
//!
//! Tiga representasi yang dikenali format:
//! - `0x0004`: UTF-8 special (tanpa jaminan NUL terminator)
//! - `0x0204`: UTF-8, NUL-terminated
//! - `0x0404`: u32 little-endian
//!
//! Tag lain disimpan sebagai opaque bytes supaya tetap bisa round-trip.

use std::fmt;

use serde::Serialize;

use super::error::CodecError;
use super::layout::align4;

/// Data format tags.
mod tags {
    pub const UTF8_SPECIAL: u16 = 0x0004;
    pub const UTF8: u16 = 0x0204;
    pub const INT32: u16 = 0x0404;
}

/// Format tag of an index record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    SpecialUtf8,
    Utf8,
    Int32,
    /// Unrecognized tag, kept verbatim.
    Other(u16),
}

impl Format {
    #[inline(always)]
    pub fn from_u16(v: u16) -> Self {
        match v {
            tags::UTF8_SPECIAL => Self::SpecialUtf8,
            tags::UTF8 => Self::Utf8,
            tags::INT32 => Self::Int32,
            other => Self::Other(other),
        }
    }

    #[inline(always)]
    pub fn as_u16(self) -> u16 {
        match self {
            Self::SpecialUtf8 => tags::UTF8_SPECIAL,
            Self::Utf8 => tags::UTF8,
            Self::Int32 => tags::INT32,
            Self::Other(tag) => tag,
        }
    }

    #[inline]
    pub fn is_text(self) -> bool {
        matches!(self, Self::SpecialUtf8 | Self::Utf8)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpecialUtf8 => f.write_str("utf8-special"),
            Self::Utf8 => f.write_str("utf8"),
            Self::Int32 => f.write_str("int32"),
            Self::Other(tag) => write!(f, "0x{tag:04X}"),
        }
    }
}

impl Serialize for Format {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Integer(u32),
    /// Bytes of an unrecognized format, with the tag they were stored under.
    Opaque { tag: u16, bytes: Vec<u8> },
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Format tag this value encodes to by default.
    pub fn natural_format(&self) -> Format {
        match self {
            Self::Text(_) => Format::Utf8,
            Self::Integer(_) => Format::Int32,
            Self::Opaque { tag, .. } => Format::from_u16(*tag),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Integer(n)
    }
}

/// Decode raw data bytes under `format`.
///
/// Text dipotong di NUL pertama; kalau tidak ada NUL di dalam window,
/// seluruh window dipakai. Error offset relatif terhadap `raw`.
pub fn decode_value(format: Format, raw: &[u8]) -> Result<Value, CodecError> {
    match format {
        Format::SpecialUtf8 | Format::Utf8 => {
            let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
            Ok(Value::Text(String::from_utf8_lossy(&raw[..end]).into_owned()))
        }
        Format::Int32 => {
            if raw.len() < 4 {
                return Err(CodecError::InvalidIntegerData {
                    offset: 0,
                    len: raw.len(),
                });
            }
            Ok(Value::Integer(u32::from_le_bytes([
                raw[0], raw[1], raw[2], raw[3],
            ])))
        }
        Format::Other(tag) => Ok(Value::Opaque {
            tag,
            bytes: raw.to_vec(),
        }),
    }
}

/// Encode `value` into `buf`, zero-padding the slot to a multiple of 4.
///
/// `text_format` dipakai untuk text (special atau standard UTF-8).
/// Returns `(format, data_len)`; data_len tidak termasuk padding.
pub fn encode_value(value: &Value, text_format: Format, buf: &mut Vec<u8>) -> (Format, usize) {
    let (format, data_len) = match value {
        Value::Text(s) => {
            let format = if text_format.is_text() {
                text_format
            } else {
                Format::Utf8
            };
            buf.extend_from_slice(s.as_bytes());
            buf.push(0);
            (format, s.len() + 1)
        }
        Value::Integer(n) => {
            buf.extend_from_slice(&n.to_le_bytes());
            (Format::Int32, 4)
        }
        Value::Opaque { tag, bytes } => {
            buf.extend_from_slice(bytes);
            (Format::from_u16(*tag), bytes.len())
        }
    };
    buf.resize(buf.len() + (align4(data_len) - data_len), 0);
    (format, data_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags() {
        assert_eq!(Format::from_u16(0x0004), Format::SpecialUtf8);
        assert_eq!(Format::from_u16(0x0204), Format::Utf8);
        assert_eq!(Format::from_u16(0x0404), Format::Int32);
        assert_eq!(Format::from_u16(0x1234), Format::Other(0x1234));
        assert_eq!(Format::Other(0x1234).as_u16(), 0x1234);
        assert_eq!(Format::Other(0x00AB).to_string(), "0x00AB");
    }

    #[test]
    fn test_text_truncates_at_nul() {
        let value = decode_value(Format::Utf8, b"ABC\0\0\0\0").unwrap();
        assert_eq!(value, Value::Text("ABC".into()));
    }

    #[test]
    fn test_text_without_terminator() {
        let value = decode_value(Format::SpecialUtf8, b"BLUS12345").unwrap();
        assert_eq!(value.as_text(), Some("BLUS12345"));
    }

    #[test]
    fn test_integer_requires_four_bytes() {
        assert_eq!(
            decode_value(Format::Int32, &[1, 2, 3]),
            Err(CodecError::InvalidIntegerData { offset: 0, len: 3 })
        );
        let value = decode_value(Format::Int32, &[0xFF, 0xFF, 0xFF, 0xFF, 9]).unwrap();
        assert_eq!(value.as_integer(), Some(u32::MAX));
    }

    #[test]
    fn test_unknown_tag_is_opaque() {
        let value = decode_value(Format::Other(0x0999), &[1, 2, 3]).unwrap();
        assert_eq!(
            value,
            Value::Opaque {
                tag: 0x0999,
                bytes: vec![1, 2, 3]
            }
        );
    }

    #[test]
    fn test_encode_text_pads_slot() {
        let mut buf = Vec::new();
        let (format, len) = encode_value(&Value::from("DG"), Format::Utf8, &mut buf);
        assert_eq!(format, Format::Utf8);
        assert_eq!(len, 3);
        assert_eq!(buf, b"DG\0\0");

        buf.clear();
        let (_, len) = encode_value(&Value::from("ABC"), Format::Utf8, &mut buf);
        assert_eq!(len, 4);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn test_encode_integer() {
        let mut buf = Vec::new();
        let (format, len) = encode_value(&Value::Integer(42), Format::Int32, &mut buf);
        assert_eq!((format, len), (Format::Int32, 4));
        assert_eq!(buf, [42, 0, 0, 0]);
    }

    #[test]
    fn test_encode_text_keeps_special_format() {
        let mut buf = Vec::new();
        let (format, _) = encode_value(&Value::from("x"), Format::SpecialUtf8, &mut buf);
        assert_eq!(format, Format::SpecialUtf8);

        // Non-text hint falls back to standard UTF-8
        let (format, _) = encode_value(&Value::from("x"), Format::Int32, &mut buf);
        assert_eq!(format, Format::Utf8);
    }
}
