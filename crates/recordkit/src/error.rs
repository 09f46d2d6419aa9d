//! Error types for the recordkit crate.

use thiserror::Error;

/// Errors that can surface from record access and comparison.
///
/// Most lookups never fail: an unresolvable path is `None`, not an error.
/// Only ordering comparisons between incompatible values propagate to the
/// caller. Rejected assignments are reported internally and swallowed by
/// the best-effort collection operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// An ordering operator was applied to values that have no ordering.
    #[error("cannot order {left} against {right} with '{op}'")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    /// A record refused an assignment or a deletion.
    #[error("{shape} record rejected key {key}: {reason}")]
    Rejected {
        shape: &'static str,
        key: String,
        reason: &'static str,
    },
}

impl RecordError {
    /// Creates a type mismatch error for an ordering comparison.
    pub fn type_mismatch(op: &'static str, left: &'static str, right: &'static str) -> Self {
        RecordError::TypeMismatch { op, left, right }
    }

    /// Creates a rejected-mutation error.
    pub fn rejected(shape: &'static str, key: impl ToString, reason: &'static str) -> Self {
        RecordError::Rejected {
            shape,
            key: key.to_string(),
            reason,
        }
    }
}

/// Result type for recordkit operations.
pub type Result<T> = std::result::Result<T, RecordError>;
