//! # Order Service
//!
//! The business logic of the system. [`OrderService`] receives its collaborators
//! explicitly: an [`OrderStore`](crate::store::OrderStore) to persist through, a
//! [`ProductValidator`](crate::clients::ProductValidator) to price and name products, and
//! the [`OrderSettings`](crate::config::OrderSettings) in force.
//!
//! | Operation | Product lookups | Store calls |
//! |-----------|-----------------|-------------|
//! | [`create`](OrderService::create) | one batched call | one insert |
//! | [`find_all`](OrderService::find_all) | none | one page query |
//! | [`find_one`](OrderService::find_one) | one batched call | one read |
//! | [`change_status`](OrderService::change_status) | one batched call | one read, at most one update |

mod catalog;
pub mod error;
pub mod order_service;
pub mod pagination;

pub use error::*;
pub use order_service::*;
pub use pagination::*;
