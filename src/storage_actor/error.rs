use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),
    #[error("Upload rejected: {0}")]
    Rejected(String),
    #[error("Upload timed out after {0}s")]
    Timeout(u64),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for StorageError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(path) => StorageError::NotFound(path),
            FrameworkError::Rejected(reason) => StorageError::Rejected(reason),
            FrameworkError::AlreadyExists(path) => {
                StorageError::Rejected(format!("object already exists: {path}"))
            }
            other => StorageError::ActorCommunicationError(other.to_string()),
        }
    }
}
