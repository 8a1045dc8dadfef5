use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::admin_actor::AdminError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Invalid product: {0}")]
    Invalid(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AdminError),
    #[error("Image upload failed: {0}")]
    Upload(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProductError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::Rejected(reason) => ProductError::Invalid(reason),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
