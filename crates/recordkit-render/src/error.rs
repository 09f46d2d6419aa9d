//! Error types for record rendering.

use thiserror::Error;

/// Errors that can occur while rendering records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Rendering options that would produce ambiguous output.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
