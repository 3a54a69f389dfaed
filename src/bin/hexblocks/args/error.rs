use thiserror::Error;

use super::types::ParseArgError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Arg(#[from] ParseArgError),
    #[error(transparent)]
    Hex(#[from] hexblocks::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("block index {index} out of range ({count} blocks)")]
    BlockIndex { index: usize, count: usize },
    #[error("unsupported file extension '{0}' (expected .bin or .hex)")]
    UnsupportedExtension(String),
    #[error("{key}: {message}")]
    Ini { key: String, message: String },
}
