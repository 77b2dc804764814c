use std::path::PathBuf;
use thiserror::Error;

pub use lhncore::error::RecordError;

#[derive(Debug, Error)]
pub enum SidebarError {
    #[error("Failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read state file {path:?}: {source}")]
    StateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid state file {path:?}: {reason}")]
    StateInvalid { path: PathBuf, reason: String },

    #[error("Record error: {0}")]
    Record(#[from] RecordError),
}

pub type Result<T> = std::result::Result<T, SidebarError>;
