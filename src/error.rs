use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Enter a positive amount (got '{0}')")]
    InvalidAmount(String),

    #[error("Enter a date as YYYY-MM-DD (got '{0}')")]
    InvalidDate(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown transaction type: {0}")]
    UnknownType(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FinboardError>;
