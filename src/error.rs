// Error types for tripdesk.
// Covers store lookups, CSV export, configuration, and filesystem errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("No {entity} to export")]
    NothingToExport { entity: &'static str },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
