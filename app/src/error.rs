//! FILENAME: app/src/error.rs

use persistence::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to load dataset: {0}")]
    Load(#[from] PersistenceError),

    #[error("Logger initialization failed: {0}")]
    Logging(String),
}
