use thiserror::Error;

/// Result type for persistence backend operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures of the durable medium backing the link mapping.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors returned by the link store to its callers.
#[derive(Debug, Clone, Error)]
pub enum LinkError {
    #[error("URL is required")]
    MissingUrl,
    #[error("invalid short code: {0}")]
    InvalidCode(String),
    #[error("short code already exists: {0}")]
    CodeTaken(String),
    #[error("short code is reserved: {0}")]
    ReservedCode(String),
    #[error("could not find a free short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
    #[error(transparent)]
    StorageUnavailable(#[from] StorageError),
}

impl LinkError {
    /// Returns `true` when the failure is a storage timeout, which callers
    /// may surface as a transient error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::StorageUnavailable(StorageError::Timeout(_)))
    }
}
