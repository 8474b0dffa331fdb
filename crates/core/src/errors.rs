use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("invalid identifier: {0}")]
    InvalidId(String),
    #[error("task not found: {id}")]
    TaskNotFound { id: String },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type MarketResult<T> = Result<T, MarketError>;

impl MarketError {
    pub fn invalid_id<S: Into<String>>(id: S) -> Self {
        Self::InvalidId(id.into())
    }
    pub fn task_not_found<S: Into<String>>(id: S) -> Self {
        Self::TaskNotFound { id: id.into() }
    }
    pub fn validation_error<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Stable message safe to echo back to API clients.
    pub fn user_message(&self) -> &str {
        match self {
            MarketError::InvalidId(_) => "Invalid task ID",
            MarketError::TaskNotFound { .. } => "Task not found",
            MarketError::Validation(_) => "Validation failed",
            MarketError::Database(_) => "Server error",
            MarketError::Configuration(_) => "Server error",
        }
    }
}
