use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Failed to decode record {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record {0} has an empty identifier")]
    MissingId(String),

    #[error("Unexpected value for {key}: expected {expected}")]
    UnexpectedShape { key: String, expected: &'static str },
}

pub type Result<T> = std::result::Result<T, RecordError>;
