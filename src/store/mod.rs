//! Persistence of orders and their line items.
//!
//! [`OrderStore`] is the seam the order service writes through. Two backends exist:
//!
//! - [`PgOrderStore`] keeps orders in PostgreSQL; an order and its items are written in one
//!   transaction.
//! - [`MemoryOrderStore`] keeps them in a [`ResourceActor<Order>`](actor_framework::ResourceActor);
//!   the actor's sequential loop makes every insert atomic.

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::*;
pub use memory::*;
pub use postgres::*;

use crate::model::{NewOrder, Order, OrderFilter, OrderId, OrderStatus};
use actor_framework::Page;
use async_trait::async_trait;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Stores the order and all of its items, or nothing. The store assigns the id and the
    /// timestamps.
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// Orders matching `filter`, oldest first, with the number of matches overall.
    async fn find_page(
        &self,
        filter: OrderFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Page<Order>, StoreError>;

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// Sets the status and bumps `updated_at`. Fails with [`StoreError::NotFound`] for an
    /// unknown id.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, StoreError>;
}
