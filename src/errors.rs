use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Error type that captures domain and persistence failures.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unknown category: {0}")]
    UnknownCategory(Uuid),
    #[error("Category `{0}` is protected and cannot be deleted")]
    ProtectedCategory(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid date `{0}`: expected dd/mm/yyyy")]
    InvalidDate(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
