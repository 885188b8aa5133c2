//! # Product Client
//!
//! High-level API for the `Product` actor. It wraps a `ResourceClient<Product>`, exposes the
//! catalog operations and implements [`ProductValidator`] for the order service.
use crate::clients::ProductValidator;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    timeout: Duration,
}

impl ProductClient {
    /// `timeout` bounds every `validate_products` call.
    pub fn new(inner: ResourceClient<Product>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Changes name or price. Orders placed earlier keep the price they were created with.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProductError::from(e)
    }
}

#[async_trait]
impl ProductValidator for ProductClient {
    #[instrument(skip(self), fields(count = ids.len()))]
    async fn validate_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError> {
        match tokio::time::timeout(self.timeout, self.get_many(ids.to_vec())).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(timeout_ms, "Product validation timed out");
                Err(ProductError::Timeout { timeout_ms })
            }
        }
    }
}
