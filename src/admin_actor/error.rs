use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during admin authentication.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Session is missing, expired or revoked")]
    InvalidSession,
    #[error("Admin account already exists: {0}")]
    AlreadyExists(String),
    #[error("Admin validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for AdminError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::AlreadyExists(name) => AdminError::AlreadyExists(name),
            FrameworkError::Rejected(reason) => AdminError::ValidationError(reason),
            FrameworkError::NotFound(_) => AdminError::InvalidCredentials,
            other => AdminError::ActorCommunicationError(other.to_string()),
        }
    }
}
