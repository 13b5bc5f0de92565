use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnipcatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog not found at: {0}")]
    CatalogNotFound(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Failed to open {uri}: {reason}")]
    Launch { uri: String, reason: String },

    #[error("Invalid share query: {0}")]
    InvalidShareQuery(String),

    #[error("Unknown modifier: {0}")]
    UnknownModifier(String),

    #[error("Error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SnipcatError>;
