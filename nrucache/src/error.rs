use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a configuration or resolving it into a geometry.
///
/// None of these are recoverable: the simulation does not start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read the config file at path {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("expected exactly 4 configuration values, found {found}")]
    WrongValueCount { found: usize },
    #[error("couldn't parse the JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} must be a power of two, got {value}")]
    NonPowerOfTwo { name: &'static str, value: u64 },
    #[error("{name} must be non-zero")]
    ZeroDimension { name: &'static str },
    #[error("{address_bits} address bits can't hold {required} offset and index bits")]
    AddressTooNarrow { address_bits: u32, required: u32 },
    #[error("{name} of {value} can't be allocated on this platform")]
    TooLarge { name: &'static str, value: u64 },
    #[error("addresses wider than 64 bits are not supported, got {0}")]
    AddressTooWide(u64),
}

/// Errors raised while reading an address trace
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("couldn't read the trace file at path {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("the trace is not valid UTF-8")]
    NotUtf8(#[from] std::str::Utf8Error),
    #[error("line {line}: `{token}` is not a binary address")]
    InvalidAddress { line: usize, token: String },
    #[error("line {line}: `{token}` is wider than 64 bits")]
    AddressTooWide { line: usize, token: String },
}
