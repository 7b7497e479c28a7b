use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    /// A merge lock would assign a URI that already belongs to a different lock.
    #[error("Consistency error: {0}")]
    ConsistencyError(String),

    /// Persisted state violates an invariant and cannot be loaded.
    #[error("Malformed state: {0}")]
    MalformedStateError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl AppError {
    /// Fatal errors abort a whole merge batch.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::ConsistencyError(_) | AppError::MalformedStateError(_)
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::InvalidInput(format!("Invalid URI: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
