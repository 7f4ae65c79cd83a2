use thiserror::Error;

use crate::operation::Operation;

/// Violations of the edit-script invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    /// An edit carries no text.
    #[error("edit {index} has empty text")]
    EmptyEdit { index: usize },

    /// An edit repeats the operation of the edit before it and should have
    /// been merged into it.
    #[error("edit {index} repeats the {operation} operation of its predecessor")]
    AdjacentOperations { index: usize, operation: Operation },

    /// Deletions and equalities do not reproduce the left text.
    #[error("script does not reproduce the source text")]
    SourceMismatch,

    /// Insertions and equalities do not reproduce the right text.
    #[error("script does not reproduce the target text")]
    TargetMismatch,
}

/// Convenience alias for script validation results.
pub type ScriptResult<T> = Result<T, ScriptError>;
