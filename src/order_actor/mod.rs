//! Order resource actor: the in-process home of orders when no database is configured.

pub mod entity;

use crate::model::{Order, OrderId};
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client. Ids are random v4 UUIDs.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size, OrderId::generate)
}
