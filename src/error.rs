//! Error types for the scoring engine.
//!
//! The engine favors graceful numeric degradation over hard failure, so very
//! few operations can actually error: malformed cells default to zero, empty
//! inputs produce empty results, and join misses are reported rather than
//! raised. What remains is configuration handling, where a bad file or an
//! unknown version id is a real caller mistake.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the scoring engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file could not be read or parsed, or a referenced
    /// configuration version does not exist.
    #[error("configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Build a configuration error with context.
    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::Config(msg.into())
    }
}
