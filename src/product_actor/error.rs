//! Error types for the Product actor and the product validation call.

use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// A requested product does not exist.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product data provided is invalid.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// A product with the same id is already registered.
    #[error("Product already exists: {0}")]
    AlreadyExists(String),

    /// The product service could not be reached.
    #[error("Product service unavailable: {0}")]
    Unavailable(String),

    /// The product service did not answer in time.
    #[error("Product service timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::AlreadyExists(id) => ProductError::AlreadyExists(id),
            FrameworkError::EntityError(inner) => ProductError::InvalidProduct(inner.to_string()),
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                ProductError::Unavailable(e.to_string())
            }
        }
    }
}
