//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a resource (a product, an order, ...) implements
//! to be managed by the generic [`ResourceActor`](crate::ResourceActor). It names the id,
//! the creation and update payloads, the listing filter, the injected context and the
//! error type, and provides the lifecycle hooks the actor calls while serving requests.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] runs after construction and before the entity is stored.
//!
//! The default implementation does nothing (`Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks can await other actors. The `Context` type is
/// injected into every hook when the actor starts running, which lets dependencies be wired
/// after the actor was constructed.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity (e.g., String, Uuid, u64).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Criteria used by `List` requests to select entities.
    type Filter: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per actor rather than one per message: callers match on a single
    /// type, at the cost of some precision about which request can fail how.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The key under which the actor stores this entity.
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from a freshly generated id and the payload.
    ///
    /// Entities whose payload carries its own id may ignore `id`; the actor always stores
    /// the entity under [`ActorEntity::id`].
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Whether this entity is selected by `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;
}
