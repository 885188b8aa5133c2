use crate::model::OrderId;
use crate::product_actor::ProductError;
use crate::store::StoreError;
use thiserror::Error;

/// Failures of an order operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order with id {0} not found")]
    NotFound(OrderId),

    /// The product service rejected, could not resolve, or did not answer a lookup.
    #[error("Product validation failed: {0}")]
    ValidationFailed(String),

    #[error("Order persistence failed: {0}")]
    Persistence(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        OrderError::ValidationFailed(e.to_string())
    }
}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            e => OrderError::Persistence(e.to_string()),
        }
    }
}
