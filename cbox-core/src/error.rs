//! Error types for box operations
//!
//! Rendering and stripping are total; only the boundaries that accept
//! caller-supplied ranges and styles can fail.

use thiserror::Error;

/// Errors raised when an operation is called outside its contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoxError {
    /// The range starts after it ends
    #[error("Invalid line range {start}..={end}: start is after end")]
    InvalidRange { start: usize, end: usize },

    /// The range reaches past the end of the document
    #[error("Line {line} is outside the document")]
    LineOutOfRange { line: usize },

    /// The style cannot produce a well-formed box
    #[error("Invalid style: {0}")]
    InvalidStyle(String),
}
