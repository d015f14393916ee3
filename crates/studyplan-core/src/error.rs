//! Error types for StudyPlan.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid schedule window: {0}")]
    InvalidWindow(String),

    #[error("No topics found for syllabus {0}")]
    EmptyInventory(String),

    #[error("Invalid session status: {0}")]
    InvalidStatus(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
