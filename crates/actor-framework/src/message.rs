//! # Generic Messages
//!
//! The message types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// One page of a filtered listing plus the number of entities the filter selects.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// Each actor manages one type of resource (the [`ActorEntity`]). Instead of ad-hoc messages
/// per operation, requests are standardized around the lifecycle of a persistent resource:
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize a resource; replies with the stored entity.
/// - **Get**: Fetches one resource by id.
/// - **GetMany**: Fetches a batch by id. All-or-nothing: one missing id fails the request.
/// - **Update**: Applies [`ActorEntity::Update`] to an existing resource.
/// - **List**: Returns a window of the resources selected by [`ActorEntity::Filter`],
///   in insertion order, together with the total number selected.
///
/// The associated types guarantee that a payload for one resource can't be sent to another.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    GetMany {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    List {
        filter: T::Filter,
        offset: u64,
        limit: u64,
        respond_to: Response<Page<T>>,
    },
}
