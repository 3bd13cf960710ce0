use std::str::Utf8Error;
use thiserror::Error;

/// Errors raised at the crate boundary. Parsing and writing text never fail.
#[derive(Error, Debug)]
pub enum SdpError {
    /// File access failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Input bytes were not UTF-8
    #[error("encoding error: {0}")]
    Encoding(#[from] Utf8Error),

    /// A custom rule pattern did not compile
    #[error("invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A tag order setting was rejected
    #[error("config error: {0}")]
    Config(String),
}

/// Result alias for fallible `sdpio` operations
pub type Result<T> = std::result::Result<T, SdpError>;
