//! # Product Actor
//!
//! The product service, run in-process as a [`ResourceActor<Product>`]. It owns the catalog
//! and answers the batched lookups behind `validate_products`.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`new()`] - factory that creates the actor and its client
//!
//! ## Usage
//!
//! ```rust,no_run
//! use order_service::clients::{ProductClient, ProductValidator};
//! use order_service::model::{ProductCreate, ProductId};
//! use order_service::product_actor;
//! use rust_decimal::Decimal;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client, Duration::from_secs(5));
//!     tokio::spawn(actor.run(()));
//!
//!     client
//!         .create_product(ProductCreate {
//!             id: Some(ProductId::from("p1")),
//!             name: "Widget".to_string(),
//!             price: Decimal::new(2999, 2),
//!         })
//!         .await?;
//!
//!     let products = client.validate_products(&[ProductId::from("p1")]).await?;
//!     assert_eq!(products[0].name, "Widget");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{Product, ProductId};
use actor_framework::{ResourceActor, ResourceClient};
use std::sync::atomic::{AtomicU64, Ordering};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    let product_id_counter = AtomicU64::new(1);
    let next_product_id = move || {
        let id = product_id_counter.fetch_add(1, Ordering::SeqCst);
        ProductId(format!("product_{}", id))
    };

    ResourceActor::new(buffer_size, next_product_id)
}
