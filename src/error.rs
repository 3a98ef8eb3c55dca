use std::path::PathBuf;
use thiserror::Error;

/// Typed error hierarchy for everything the CLI surfaces to the operator.
///
/// Per-row provider lookup misses are deliberately *not* errors — they are
/// resolved to the sentinel label and tallied in the enrichment report.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("input not found: {0}")]
    MissingInput(PathBuf),

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("refusing to overwrite the source database: {0}")]
    WouldClobberSource(PathBuf),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

// =========================================================================
// From impls
// =========================================================================

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Other(e.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Other(e.to_string())
    }
}

/// Allows `.map_err(|e| format!("…", e))?` to coerce into AppError.
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Other(s)
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::Other(s.to_string())
    }
}
