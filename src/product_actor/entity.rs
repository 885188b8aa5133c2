//! ActorEntity implementation for the Product domain type.
//!
//! Enables [`Product`] to be managed by the generic [`actor_framework::ResourceActor`],
//! which is how the product service runs in-process.

use super::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;

fn check_price(price: Decimal) -> Result<Decimal, ProductError> {
    if price.is_sign_negative() {
        return Err(ProductError::InvalidProduct(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(price)
}

fn check_name(name: String) -> Result<String, ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::InvalidProduct("name must not be empty".to_string()));
    }
    Ok(name)
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Filter = ();
    type Context = ();
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Keeps a caller-chosen id when the payload carries one.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(
            params.id.unwrap_or(id),
            check_name(params.name)?,
            check_price(params.price)?,
        ))
    }

    /// # Fields Updated
    /// - `name`: display name
    /// - `price`: unit price for future orders; existing orders keep their snapshot
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = check_name(name)?;
        }
        if let Some(price) = update.price {
            self.price = check_price(price)?;
        }
        Ok(())
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }
}
