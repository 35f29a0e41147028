use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced to the CLI entry point
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Git(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
