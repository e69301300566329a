use thiserror::Error;

#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("No input file given")]
    MissingInput,

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Unexpected decoded array rank: {0} (expected 2 or 3)")]
    UnexpectedShape(usize),

    #[error("Invalid channel count: {0} (expected 3)")]
    InvalidChannelCount(usize),

    #[error("Invalid crossing window: {0} (must be at least 1)")]
    InvalidWindow(usize),

    #[error("Failed to read input file: {0}")]
    InputRead(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FingerprintError>;
