use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Rejected(msg) | FrameworkError::Conflict(msg) => OrderError::ValidationError(msg),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
