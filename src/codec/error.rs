use std::str::Utf8Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Buffer size mismatch for '{layout}': expected {expected} bytes, got {actual}")]
    BufferSize {
        layout: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Field kind mismatch at '{field}': declared {declared}, accessed as {accessed}")]
    KindMismatch {
        field: &'static str,
        declared: String,
        accessed: &'static str,
    },

    #[error("No field left in '{layout}': all {declared} fields already visited")]
    FieldsExhausted {
        layout: &'static str,
        declared: usize,
    },

    #[error("Layout '{layout}' not fully written: {written} of {declared} fields")]
    FieldsRemaining {
        layout: &'static str,
        written: usize,
        declared: usize,
    },

    #[error("Invalid UTF-8 in field '{field}': {source}")]
    InvalidText {
        field: &'static str,
        source: Utf8Error,
    },
}

pub type CodecResult<T> = Result<T, CodecError>;
