use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskboardError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Placement update failed: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskboardError {
    /// Message suitable for a transient user-facing notification.
    pub fn notification(&self) -> String {
        match self {
            Self::NotFound(what) => format!("Could not find {}", what),
            Self::Persistence(msg) => format!("Move was not saved: {}", msg),
            other => other.to_string(),
        }
    }
}
