use std::io;
use thiserror::Error;

/// Error type for codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Writer or sink failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no samples to encode")]
    EmptyInput,

    /// The stream ended inside a token. `offset` is where that token starts.
    #[error("stream truncated inside token at byte {offset}")]
    TruncatedStream { offset: usize },

    /// Sample does not fit the 13-bit payload of an exact DRLE stream.
    #[error("sample {value:#06X} at index {index} exceeds the DRLE payload")]
    SampleOutOfRange { index: usize, value: u16 },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("unknown codec scheme: {0}. Available: rle, delta, drle")]
    UnknownScheme(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
