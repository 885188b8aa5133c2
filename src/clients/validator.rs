use crate::model::{Product, ProductId};
use crate::product_actor::ProductError;
use async_trait::async_trait;

/// The batched lookup the order service performs against the product service.
///
/// Implementations resolve every id or fail as a whole: one unknown id turns the entire
/// call into [`ProductError::NotFound`]. Products come back in request order.
#[async_trait]
pub trait ProductValidator: Send + Sync {
    async fn validate_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError>;
}
