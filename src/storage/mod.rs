//! Storage: PARAM.SFO file I/O dengan mmap
//!
//! - Read: file di-mmap, di-decode, lalu mapping dilepas
//! - Write: file di-size dulu, lalu encoded bytes di-copy ke mapping

mod mmap_file;

pub use mmap_file::{inspect_file, read_file, write_file, write_file_with};
