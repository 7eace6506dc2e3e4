use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
