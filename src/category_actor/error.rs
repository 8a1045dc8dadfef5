use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::admin_actor::AdminError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(String),
    #[error("Category already exists: {0}")]
    AlreadyExists(String),
    #[error("Category is reserved: {0}")]
    Reserved(String),
    #[error("Invalid category: {0}")]
    Invalid(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AdminError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CategoryError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(name) => CategoryError::NotFound(name),
            FrameworkError::AlreadyExists(name) => CategoryError::AlreadyExists(name),
            FrameworkError::Rejected(reason) => CategoryError::Invalid(reason),
            other => CategoryError::ActorCommunicationError(other.to_string()),
        }
    }
}
