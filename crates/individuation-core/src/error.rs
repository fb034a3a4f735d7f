//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Nothing in the engine performs I/O, so every variant describes a decision
/// made by the program's own logic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A command was refused by domain policy. State is unchanged.
    #[error("command rejected: {0}")]
    Rejected(String),

    /// Configuration could not be loaded or is out of range.
    #[error("configuration error: {0}")]
    Configuration(String),
}
