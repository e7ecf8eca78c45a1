// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RollupError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Catalog parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RollupError>;

// Allow `?` on std::io::Error by converting to RollupError::Io with unknown path.
impl From<std::io::Error> for RollupError {
    fn from(source: std::io::Error) -> Self {
        RollupError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
