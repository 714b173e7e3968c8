use thiserror::Error;

/// Errors raised by the lab itself, as opposed to failures of the wrapped call.
#[derive(Debug, Error)]
pub enum LabError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LabError>;
