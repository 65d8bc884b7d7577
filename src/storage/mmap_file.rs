//! Memory-mapped PARAM.SFO files
//!
//! Mapping hanya hidup selama satu panggilan decode/encode. Document
//! yang dihasilkan meng-copy semua data, jadi tidak meminjam mapping.

use std::fs::{File, OpenOptions};
use std::path::Path;

use memmap2::{Mmap, MmapOptions};
use tracing::debug;

use crate::config::EncodeConfig;
use crate::error::Result;
use crate::format::{CodecError, Decoder, Document, Encoder, Header, HEADER_SIZE};

/// Decode the PARAM.SFO file at `path`.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let (_, doc) = inspect_file(path)?;
    Ok(doc)
}

/// Decode the file at `path`, also returning its parsed header.
pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<(Header, Document)> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let len = file.metadata()?.len();

    // Zero-length mappings fail on some platforms
    if len == 0 {
        return Err(CodecError::TruncatedHeader {
            required: HEADER_SIZE,
            len: 0,
        }
        .into());
    }

    // SAFETY: Mapping read-only dan dilepas sebelum fungsi return;
    // file tidak boleh di-truncate selama decode berjalan.
    let mmap = unsafe { Mmap::map(&file)? };

    let decoder = Decoder::new(&mmap)?;
    let header = *decoder.header();
    let doc = decoder.into_document()?;

    debug!(path = %path.display(), size = len, entries = doc.len(), "read PARAM.SFO");
    Ok((header, doc))
}

/// Encode `doc` and write it to `path` with the default configuration.
pub fn write_file<P: AsRef<Path>>(path: P, doc: &Document) -> Result<()> {
    write_file_with(path, doc, EncodeConfig::default())
}

/// Encode `doc` with `config` and write it to `path`, replacing any content.
pub fn write_file_with<P: AsRef<Path>>(path: P, doc: &Document, config: EncodeConfig) -> Result<()> {
    let path = path.as_ref();
    let mut encoder = Encoder::new(config);
    let bytes = encoder.encode(doc)?;

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.set_len(bytes.len() as u64)?;

    // SAFETY: File dibuka read/write dan sudah di-size ke bytes.len();
    // header 20 bytes menjamin panjang mapping > 0.
    let mut mmap = unsafe { MmapOptions::new().len(bytes.len()).map_mut(&file)? };
    mmap.copy_from_slice(bytes);
    mmap.flush()?;

    debug!(path = %path.display(), size = bytes.len(), entries = doc.len(), "wrote PARAM.SFO");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlotPolicy;
    use crate::error::Error;
    use crate::format::{keys, Entry};

    fn sample() -> Document {
        Document::default()
            .with_entry(Entry::text(keys::TITLE, "Forest Guardian: Nature's Call"))
            .with_entry(Entry::text(keys::TITLE_ID, "BCES10101"))
            .with_entry(Entry::integer(keys::PARENTAL_LEVEL, 1))
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PARAM.SFO");

        write_file(&path, &sample()).unwrap();
        let doc = read_file(&path).unwrap();

        assert_eq!(doc, sample());
    }

    #[test]
    fn test_overwrite_shrinks_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PARAM.SFO");

        let padded = sample().with_entry(Entry::text(keys::LICENSE, "x").with_max_len(4096));
        write_file_with(
            &path,
            &padded,
            EncodeConfig::default().slot_policy(SlotPolicy::Reserved),
        )
        .unwrap();
        write_file(&path, &sample()).unwrap();

        let (header, doc) = inspect_file(&path).unwrap();
        assert_eq!(header.entry_count, 3);
        assert_eq!(doc.title_id(), Some("BCES10101"));
        assert!(std::fs::metadata(&path).unwrap().len() < 4096);
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            read_file(file.path()),
            Err(Error::Codec(CodecError::TruncatedHeader { len: 0, .. }))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_file(dir.path().join("nope.sfo")),
            Err(Error::Io(_))
        ));
    }
}
