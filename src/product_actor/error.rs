use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProductError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::Rejected(msg) => ProductError::InvalidInput(msg),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
