//! Error types for the diff crate.

/// Errors that can occur while configuring the diff engine.
///
/// Computing a diff never fails; these only arise when building a
/// [`Differ`](crate::Differ) from a configuration.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A configuration value is out of range.
    #[error("invalid diff configuration: {0}")]
    InvalidConfig(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
