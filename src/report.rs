//! Text and JSON rendering of a decoded document.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::format::{Document, Format, Header, Value};

const NOT_FOUND: &str = "[not found]";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HeaderReport {
    version: String,
    key_table_offset: u32,
    data_table_offset: u32,
    entry_count: u32,
}

#[derive(Debug, Serialize)]
struct EntryReport<'a> {
    name: &'a str,
    format: Format,
    value: serde_json::Value,
}

/// Summary of the well-known attributes. Missing values render as "".
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary<'a> {
    pub title: &'a str,
    pub title_id: &'a str,
    pub app_version: &'a str,
    pub category: &'a str,
}

impl<'a> Summary<'a> {
    pub fn of(doc: &'a Document) -> Self {
        Self {
            title: doc.title().unwrap_or_default(),
            title_id: doc.title_id().unwrap_or_default(),
            app_version: doc.app_version().unwrap_or_default(),
            category: doc.category().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    header: HeaderReport,
    entries: Vec<EntryReport<'a>>,
    summary: Summary<'a>,
}

/// Render `doc` as pretty-printed JSON.
///
/// Opaque values render as `null`.
pub fn render_json(header: &Header, doc: &Document) -> serde_json::Result<String> {
    let report = Report {
        header: HeaderReport {
            version: header.version_string(),
            key_table_offset: header.key_table_offset,
            data_table_offset: header.data_table_offset,
            entry_count: header.entry_count,
        },
        entries: doc
            .iter()
            .map(|entry| EntryReport {
                name: &entry.name,
                format: entry.format,
                value: match &entry.value {
                    Value::Text(s) => serde_json::Value::from(s.as_str()),
                    Value::Integer(n) => serde_json::Value::from(*n),
                    Value::Opaque { .. } => serde_json::Value::Null,
                },
            })
            .collect(),
        summary: Summary::of(doc),
    };
    serde_json::to_string_pretty(&report)
}

/// Render `doc` as text. `verbose` adds the header and every entry.
pub fn render_text(header: &Header, doc: &Document, verbose: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_text(&mut out, header, doc, verbose)?;
    Ok(out)
}

fn write_text(out: &mut String, header: &Header, doc: &Document, verbose: bool) -> fmt::Result {
    if verbose {
        writeln!(out, "PARAM.SFO")?;
        writeln!(out, "=========")?;
        writeln!(out, "Version:         {}", header.version_string())?;
        writeln!(out, "Key Table:       offset {}", header.key_table_offset)?;
        writeln!(out, "Data Table:      offset {}", header.data_table_offset)?;
        writeln!(out, "Entry Count:     {}\n", header.entry_count)?;
        writeln!(out, "Entries:")?;
        writeln!(out, "--------")?;

        for entry in doc {
            let value = match &entry.value {
                Value::Text(s) => s.clone(),
                Value::Integer(n) => n.to_string(),
                Value::Opaque { tag, .. } => format!("[unsupported format 0x{tag:04X}]"),
            };
            writeln!(out, "{:<20} {}", format!("{}:", entry.name), value)?;
        }
        writeln!(out)?;
    }

    let title = doc.title().filter(|v| !v.is_empty());
    let title_id = doc.title_id().filter(|v| !v.is_empty());

    writeln!(out, "Summary:")?;
    writeln!(out, "========")?;
    writeln!(out, "Game Title:  {}", title.unwrap_or(NOT_FOUND))?;
    writeln!(out, "Title ID:    {}", title_id.unwrap_or(NOT_FOUND))?;
    if let Some(app_ver) = doc.app_version().filter(|v| !v.is_empty()) {
        writeln!(out, "App Version: {app_ver}")?;
    }
    if let Some(category) = doc.category().filter(|v| !v.is_empty()) {
        writeln!(out, "Category:    {category}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{decode, encode, keys, Decoder, Entry, VERSION};

    fn decoded() -> (Header, Document) {
        let doc = Document::new(VERSION)
            .with_entry(Entry::text(keys::APP_VER, "01.00"))
            .with_entry(Entry::integer(keys::BOOTABLE, 1))
            .with_entry(Entry::text(keys::TITLE, "Galactic Warriors: Return of the Void"))
            .with_entry(Entry::opaque("BLOB", 0x0999, vec![1, 2]));
        let bytes = encode(&doc).unwrap();
        let header = *Decoder::new(&bytes).unwrap().header();
        (header, decode(&bytes).unwrap())
    }

    #[test]
    fn test_text_summary_only() {
        let (header, doc) = decoded();
        let text = render_text(&header, &doc, false).unwrap();

        assert!(text.starts_with("Summary:"));
        assert!(text.contains("Game Title:  Galactic Warriors: Return of the Void"));
        assert!(text.contains("Title ID:    [not found]"));
        assert!(text.contains("App Version: 01.00"));
        assert!(!text.contains("Category:"));
    }

    #[test]
    fn test_text_verbose() {
        let (header, doc) = decoded();
        let text = render_text(&header, &doc, true).unwrap();

        assert!(text.contains("Version:         1.1"));
        assert!(text.contains("Entry Count:     4"));
        assert!(text.contains("BOOTABLE:            1"));
        assert!(text.contains("BLOB:                [unsupported format 0x0999]"));
    }

    #[test]
    fn test_empty_title_is_not_found() {
        let doc = Document::new(VERSION)
            .with_entry(Entry::text(keys::TITLE, ""))
            .with_entry(Entry::text(keys::TITLE_ID, ""));
        let bytes = encode(&doc).unwrap();
        let header = *Decoder::new(&bytes).unwrap().header();
        let text = render_text(&header, &decode(&bytes).unwrap(), false).unwrap();

        assert!(text.contains("Game Title:  [not found]"));
        assert!(text.contains("Title ID:    [not found]"));
        assert!(!text.contains("Game Title:  \n"));
    }

    #[test]
    fn test_json_report() {
        let (header, doc) = decoded();
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&header, &doc).unwrap()).unwrap();

        assert_eq!(json["header"]["version"], "1.1");
        assert_eq!(json["header"]["entryCount"], 4);
        assert_eq!(json["entries"][1]["name"], "BOOTABLE");
        assert_eq!(json["entries"][1]["format"], "int32");
        assert_eq!(json["entries"][1]["value"], 1);
        assert!(json["entries"][3]["value"].is_null());
        assert_eq!(json["summary"]["appVersion"], "01.00");
        assert_eq!(json["summary"]["titleId"], "");
    }
}
