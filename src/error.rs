use thiserror::Error;

use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::storage::StorageError;
use crate::user_actor::UserError;

/// Errors surfaced by admin operations, collapsed to the three outcomes a caller acts on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Internal(String),
}

impl AdminError {
    /// HTTP status an endpoint would answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            AdminError::NotFound(_) => 404,
            AdminError::Validation(_) => 400,
            AdminError::Internal(_) => 500,
        }
    }
}

impl From<UserError> for AdminError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => AdminError::NotFound(e.to_string()),
            UserError::AlreadyExists(_) | UserError::ValidationError(_) | UserError::InvalidCredentials => {
                AdminError::Validation(e.to_string())
            }
            UserError::HashingError(_) | UserError::ActorCommunicationError(_) => AdminError::Internal(e.to_string()),
        }
    }
}

impl From<ProductError> for AdminError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(_) => AdminError::NotFound(e.to_string()),
            ProductError::InsufficientStock { .. } | ProductError::ValidationError(_) => {
                AdminError::Validation(e.to_string())
            }
            ProductError::ActorCommunicationError(_) => AdminError::Internal(e.to_string()),
        }
    }
}

impl From<OrderError> for AdminError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(_) => AdminError::NotFound(e.to_string()),
            OrderError::InvalidProduct(_)
            | OrderError::InvalidUser(_)
            | OrderError::InsufficientStock(_)
            | OrderError::ValidationError(_) => AdminError::Validation(e.to_string()),
            OrderError::ActorCommunicationError(_) => AdminError::Internal(e.to_string()),
        }
    }
}

impl From<StorageError> for AdminError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::InvalidUpload(_) | StorageError::AlreadyExists(_) => AdminError::Validation(e.to_string()),
            StorageError::NotFound(_) => AdminError::NotFound(e.to_string()),
            StorageError::Backend(_) => AdminError::Internal(e.to_string()),
        }
    }
}
