//! Error types for access decisions

/// Result type for evaluator operations
pub type AccessResult<T> = Result<T, AccessError>;

/// Reasons an access decision could not be reached
///
/// Every variant must be read as "not granted" by callers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("{collaborator} unavailable: {reason}")]
    CollaboratorUnavailable { collaborator: &'static str, reason: String },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Misconfiguration: {0}")]
    Misconfiguration(String),
}

impl AccessError {
    pub fn collaborator(collaborator: &'static str, reason: impl Into<String>) -> Self {
        AccessError::CollaboratorUnavailable { collaborator, reason: reason.into() }
    }
}
