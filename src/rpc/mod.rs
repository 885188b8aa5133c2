//! Command surface of the order service: payload types, the error shape every failure takes
//! on the way out, and the controller actor that serves the commands.
//!
//! | Command | Payload | Reply |
//! |---------|---------|-------|
//! | `create_order` | [`CreateOrderDto`] | [`OrderView`](crate::model::OrderView) |
//! | `find_all_orders` | [`OrderPaginationDto`] | [`OrderPage`](crate::service::OrderPage) |
//! | `find_one_order` | [`FindOneOrderDto`] | [`OrderView`](crate::model::OrderView) |
//! | `change_order_status` | [`ChangeOrderStatusDto`] | [`OrderView`](crate::model::OrderView) |

pub mod controller;
pub mod dto;
pub mod error;

pub use controller::*;
pub use dto::*;
pub use error::*;

pub const CREATE_ORDER: &str = "create_order";
pub const FIND_ALL_ORDERS: &str = "find_all_orders";
pub const FIND_ONE_ORDER: &str = "find_one_order";
pub const CHANGE_ORDER_STATUS: &str = "change_order_status";
