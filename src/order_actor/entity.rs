//! ActorEntity implementation for the Order domain type.
//!
//! This is what backs the in-memory order store: a [`ResourceActor<Order>`](actor_framework::ResourceActor)
//! owns every order and serializes all writes to it.

use crate::model::{NewOrder, Order, OrderFilter, OrderId, OrderStatus};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = NewOrder;
    type Update = OrderStatus;
    type Filter = OrderFilter;
    type Context = ();
    type Error = Infallible;

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn from_create_params(id: OrderId, params: NewOrder) -> Result<Self, Self::Error> {
        Ok(Order::from_new(id, params))
    }

    /// Only the status can change once an order is placed.
    async fn on_update(&mut self, status: OrderStatus, _ctx: &()) -> Result<(), Self::Error> {
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter.matches(self)
    }
}
