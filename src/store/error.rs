use crate::codec::CodecError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Layout '{layout}' declares a zero-byte record")]
    EmptyLayout { layout: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Lock error: {0}")]
    Lock(#[source] io::Error),

    #[error("Lock not acquired within {waited_ms} ms")]
    LockTimeout { waited_ms: u64 },

    #[error("Corrupt record at position {position}: {source}")]
    Corrupt {
        position: u64,
        #[source]
        source: CodecError,
    },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Invalid position {position}: store holds {len} records")]
    InvalidPosition { position: u64, len: u64 },
}

pub type StoreResult<T> = Result<T, StoreError>;
