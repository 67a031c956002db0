use calcbook_domain::{RecordId, UnknownOperation};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),
    #[error("Calculation not found: {0}")]
    NotFound(RecordId),
    #[error(transparent)]
    Authentication(#[from] AuthError),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<UnknownOperation> for CoreError {
    fn from(err: UnknownOperation) -> Self {
        CoreError::InvalidOperation(err.0)
    }
}

/// Failures reported by an [`IdentityProvider`](crate::IdentityProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing authentication token")]
    MissingToken,
    #[error("invalid authentication token")]
    InvalidToken,
    #[error("authentication token has been revoked")]
    Revoked,
}
