use thiserror::Error;

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Why an operation on the tracked items was refused or couldn't be persisted. Whenever one of
/// these is returned the in-memory document is exactly what it was before the call.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Item '{0}' already exists")]
    DuplicateItem(String),

    #[error("Item '{0}' doesn't exist")]
    ItemNotFound(String),

    #[error("Item '{item}' has no record '{timestamp}'")]
    RecordNotFound { item: String, timestamp: String },

    #[error("'{0}' is not a valid timestamp, expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp(String),

    #[error("'{0}' is not a valid item name")]
    InvalidName(String),

    #[error("Storage is unavailable: {0}")]
    StorageUnavailable(#[from] std::io::Error),

    #[error("Failed to serialize the document: {0}")]
    Serialization(#[from] serde_json::Error),
}
