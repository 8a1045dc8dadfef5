use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::admin_actor::AdminError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AdminError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Rejected(reason) => OrderError::ValidationError(reason),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
