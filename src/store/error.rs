use crate::model::OrderId;
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors reported by an [`OrderStore`](super::OrderStore) backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Database error: {0}")]
    Database(String),

    /// The backend could not be reached (pool exhausted, connection lost, actor gone).
    #[error("Order store unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be turned back into an order.
    #[error("Corrupt order record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(e.to_string())
            }
            e => StoreError::Database(e.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::Database(format!("migration failed: {e}"))
    }
}

impl From<FrameworkError> for StoreError {
    fn from(e: FrameworkError) -> Self {
        if e.is_unavailable() {
            StoreError::Unavailable(e.to_string())
        } else {
            StoreError::Database(e.to_string())
        }
    }
}
