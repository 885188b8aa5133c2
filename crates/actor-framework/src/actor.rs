//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns the state of one kind
//! of entity. It is the "server" side of the actor model: requests are processed
//! sequentially, so the store needs no locking.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Page, ResourceRequest};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// The actor owns the store and the receiving end of the channel. However many actors are
/// running, each one handles its own messages one at a time, which is what makes a create
/// request atomic: no other request observes a half-built entity.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor (server) and a client (interface).
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Product>::new(32, || ProductId::generate());
/// tokio::spawn(actor.run(()));
/// let product = client.create(params).await?;
/// ```
///
/// # Operations
///
/// * **Create**: asks `next_id_fn` for an id, builds the entity with
///   `T::from_create_params`, runs `on_create`, rejects duplicate keys, stores it and
///   replies with the stored entity.
/// * **Get** / **GetMany**: clone entities out of the store. `GetMany` fails with
///   `NotFound` naming the first missing id.
/// * **Update**: runs `on_update` on the stored entity and replies with its new state.
/// * **List**: walks entities in insertion order, keeps those matching the filter and
///   replies with the requested window and the matching total.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    insertion_order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// * `buffer_size` - capacity of the request channel; callers wait when it is full.
    /// * `next_id_fn` - generates the id handed to `from_create_params`.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            insertion_order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name, e.g. "Order" instead of "order_service::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();
                    let result = self.create(id, params, &context).await;
                    match &result {
                        Ok(item) => {
                            info!(entity_type, id = %item.id(), size = self.store.len(), "Created")
                        }
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::GetMany { ids, respond_to } => {
                    debug!(entity_type, count = ids.len(), "GetMany");
                    let result = ids
                        .iter()
                        .map(|id| {
                            self.store
                                .get(id)
                                .cloned()
                                .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
                        })
                        .collect::<Result<Vec<_>, _>>();
                    if let Err(e) = &result {
                        warn!(entity_type, error = %e, "GetMany failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::List {
                    filter,
                    offset,
                    limit,
                    respond_to,
                } => {
                    let page = self.list(&filter, offset, limit);
                    debug!(entity_type, ?filter, offset, limit, total = page.total, "List");
                    let _ = respond_to.send(Ok(page));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut item = T::from_create_params(id, params)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        let key = item.id().clone();
        if self.store.contains_key(&key) {
            return Err(FrameworkError::AlreadyExists(key.to_string()));
        }
        self.store.insert(key.clone(), item.clone());
        self.insertion_order.push(key);
        Ok(item)
    }

    fn list(&self, filter: &T::Filter, offset: u64, limit: u64) -> Page<T> {
        let selected: Vec<&T> = self
            .insertion_order
            .iter()
            .filter_map(|id| self.store.get(id))
            .filter(|item| item.matches(filter))
            .collect();

        let total = selected.len() as u64;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        let items = selected.into_iter().skip(skip).take(take).cloned().collect();

        Page { items, total }
    }
}
