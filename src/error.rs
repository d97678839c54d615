// src/error.rs
use thiserror::Error;

/// Per-character failures. None of these abort a batch.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No embedded payload and no table after every strategy.
    #[error("no frame data source found")]
    SourceNotFound,

    /// A source was located but no move survived row filtering.
    #[error("no moves found in {origin}")]
    EmptyMoveSet { origin: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rule table failed validation.
    #[error("invalid rule table: {0}")]
    Rules(String),
}

impl ExtractError {
    pub fn rules(msg: impl Into<String>) -> Self {
        Self::Rules(msg.into())
    }
}
