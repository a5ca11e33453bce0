//! Error types for hufftext

use thiserror::Error;

use crate::frequency::Unit;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("not enough symbols to build a huffman tree")]
    InsufficientSymbols,

    #[error("symbol weights overflow a u64")]
    WeightOverflow,

    #[error("unit {unit} has no entry in the code table")]
    CodeTableMismatch { unit: Unit },

    #[error("corrupt cipher: {0}")]
    CorruptCipher(String),

    #[error("malformed key: {0}")]
    MalformedKey(String),

    #[error("invalid unit group size {0} (expected 1..={})", crate::chunking::MAX_GROUP_SIZE)]
    InvalidGroupSize(usize),

    #[error("character {ch:?} at position {position} cannot be chunked")]
    UnchunkableChar { ch: char, position: usize },

    #[error("unit {0} does not map back to text")]
    InvalidUnit(Unit),

    #[error("input too large: {size} bytes exceeds limit of {max}")]
    InputTooLarge { size: usize, max: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
