//! # Actor Framework
//!
//! Foundational building blocks for type-safe, in-process resource actors on Tokio.
//! It applies a **Resource-Oriented Architecture (ROA)** on top of the **Actor Model**:
//! each kind of resource gets one actor that owns its state, and every actor speaks the
//! same small set of requests (create, get, batched get, update, filtered listing).
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the resource's data and lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and state ownership
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe communication
//!
//! Business logic is written once in the entity; the framework handles the channels,
//! replies and logging.
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when the actor starts (`run(context)`), not when it is
//! constructed, so actors can be created first and wired afterwards.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks needed)
//! - Multiple actors run in **parallel**
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from queued expectations, so
//! code built around a client can be tested without spawning actors.
//!
//! ## Quick Start
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! #[derive(Clone, Debug)]
//! struct Note { id: u32, text: String }
//! #[derive(Debug)] struct NoteCreate { text: String }
//! #[derive(Debug)] struct NoteEdit { text: String }
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl ActorEntity for Note {
//!     type Id = u32;
//!     type Create = NoteCreate;
//!     type Update = NoteEdit;
//!     type Filter = ();
//!     type Context = ();
//!     type Error = NoteError;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, NoteError> {
//!         Ok(Self { id, text: params.text })
//!     }
//!     async fn on_update(&mut self, edit: NoteEdit, _: &()) -> Result<(), NoteError> {
//!         self.text = edit.text;
//!         Ok(())
//!     }
//!     fn matches(&self, _: &()) -> bool { true }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let counter = AtomicU32::new(1);
//!     let (actor, client) = ResourceActor::<Note>::new(10, move || counter.fetch_add(1, Ordering::SeqCst));
//!     tokio::spawn(actor.run(()));
//!
//!     let note = client.create(NoteCreate { text: "hello".into() }).await.unwrap();
//!     let fetched = client.get(note.id).await.unwrap().unwrap();
//!     assert_eq!(fetched.text, "hello");
//! }
//! ```

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Page, ResourceRequest, Response};
