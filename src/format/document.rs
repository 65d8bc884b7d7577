//! Logical document: ordered name → typed value entries.

use super::header::VERSION;
use super::value::{Format, Value};

/// Well-known attribute names.
pub mod keys {
    pub const APP_VER: &str = "APP_VER";
    pub const ATTRIBUTE: &str = "ATTRIBUTE";
    pub const BOOTABLE: &str = "BOOTABLE";
    pub const CATEGORY: &str = "CATEGORY";
    pub const LICENSE: &str = "LICENSE";
    pub const NP_COMMUNICATION_ID: &str = "NP_COMMUNICATION_ID";
    pub const PARENTAL_LEVEL: &str = "PARENTAL_LEVEL";
    pub const PS3_SYSTEM_VER: &str = "PS3_SYSTEM_VER";
    pub const RESOLUTION: &str = "RESOLUTION";
    pub const SOUND_FORMAT: &str = "SOUND_FORMAT";
    pub const TITLE: &str = "TITLE";
    pub const TITLE_ID: &str = "TITLE_ID";
    pub const VERSION: &str = "VERSION";
}

/// One resolved entry.
///
/// `format`, `data_len` dan `max_len` dibawa dari index record supaya
/// re-encode tidak kehilangan informasi.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub value: Value,
    pub format: Format,
    pub data_len: u32,
    pub max_len: u32,
}

impl Entry {
    /// Build an entry, deriving format and lengths from the value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let data_len = match &value {
            Value::Text(s) => s.len().saturating_add(1),
            Value::Integer(_) => 4,
            Value::Opaque { bytes, .. } => bytes.len(),
        };
        let data_len = u32::try_from(data_len).unwrap_or(u32::MAX);
        Self {
            name: name.into(),
            format: value.natural_format(),
            value,
            data_len,
            max_len: data_len,
        }
    }

    /// Text entry. Text containing NUL is rejected at encode, karena
    /// decode memotong di NUL pertama.
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, Value::Text(text.into()))
    }

    /// Text stored under the special UTF-8 tag (`0x0004`).
    pub fn special_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut entry = Self::text(name, text);
        entry.format = Format::SpecialUtf8;
        entry
    }

    pub fn integer(name: impl Into<String>, n: u32) -> Self {
        Self::new(name, Value::Integer(n))
    }

    /// Raw bytes under `tag`. Tag yang dikenali (0x0004/0x0204/0x0404)
    /// ditolak saat encode dengan `CodecError::InvalidValue`.
    pub fn opaque(name: impl Into<String>, tag: u16, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(
            name,
            Value::Opaque {
                tag,
                bytes: bytes.into(),
            },
        )
    }

    /// Set the reserved slot size (never below the data length).
    #[must_use]
    pub fn with_max_len(mut self, max_len: u32) -> Self {
        self.max_len = max_len.max(self.data_len);
        self
    }
}

/// An ordered PARAM.SFO document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Header format version.
    pub version: u32,
    entries: Vec<Entry>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(VERSION)
    }
}

impl Document {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            entries: Vec::new(),
        }
    }

    pub(crate) fn from_entries(version: u32, entries: Vec<Entry>) -> Self {
        Self { version, entries }
    }

    #[must_use]
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// First entry named `name`.
    pub fn get_entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Text of the first entry named `name`, if that entry holds text.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get_entry(name).and_then(|entry| entry.value.as_text())
    }

    /// Integer of the first entry named `name`, if that entry holds one.
    pub fn get_integer(&self, name: &str) -> Option<u32> {
        self.get_entry(name).and_then(|entry| entry.value.as_integer())
    }

    pub fn title(&self) -> Option<&str> {
        self.get_text(keys::TITLE)
    }

    pub fn title_id(&self) -> Option<&str> {
        self.get_text(keys::TITLE_ID)
    }

    pub fn app_version(&self) -> Option<&str> {
        self.get_text(keys::APP_VER)
    }

    pub fn category(&self) -> Option<&str> {
        self.get_text(keys::CATEGORY)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
