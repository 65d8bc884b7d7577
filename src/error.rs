//! Crate-level error type.

use std::io;

use thiserror::Error;

use crate::format::CodecError;

/// Errors from file-level operations (codec + I/O).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
