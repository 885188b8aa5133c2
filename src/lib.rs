//! # Order Service
//!
//! > **Order management on resource-oriented actors.**
//!
//! Orders are created from a list of product ids and quantities, priced against a separate
//! product service, stored with their line items, listed page by page and moved between
//! statuses. Every operation is reachable as a command through an
//! [`OrderClient`](clients::OrderClient).
//!
//! ## Architecture Notes
//!
//! ### 1. One place for business logic
//! [`OrderService`](service::OrderService) is the only component that decides anything.
//! It receives its store, its product validator and its settings explicitly; nothing is
//! looked up globally.
//!
//! ### 2. Prices are snapshots
//! An order copies each product's price when it is created and computes its totals once.
//! Later price changes in the product service never reach stored orders. Product names are
//! not stored; they are looked up again whenever an order is returned.
//!
//! ### 3. Errors are values
//! Each layer has its own `thiserror` enum ([`ProductError`](product_actor::ProductError),
//! [`StoreError`](store::StoreError), [`OrderError`](service::OrderError)). At the command
//! boundary every failure becomes an [`RpcError`](rpc::RpcError) with a status and a message.
//!
//! ### 4. Concurrency Model
//! Actors process their messages sequentially. The controller runs each command in its own
//! task, so slow product lookups for one caller don't hold up another.
//!
//! ## Module Tour
//!
//! - [`model`] - orders, items, products and their identifiers
//! - [`product_actor`] / [`order_actor`] - the resources run on `actor_framework`
//! - [`clients`] - [`ProductClient`](clients::ProductClient) and [`OrderClient`](clients::OrderClient)
//! - [`store`] - the [`OrderStore`](store::OrderStore) seam, PostgreSQL and in-memory backends
//! - [`service`] - create, find_all, find_one, change_status
//! - [`rpc`] - payloads, errors and the [`OrderController`](rpc::OrderController)
//! - [`config`] - layered configuration
//! - [`runtime`] - [`OrderSystem`](runtime::OrderSystem) wiring, shutdown and tracing
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod rpc;
pub mod runtime;
pub mod service;
pub mod store;
