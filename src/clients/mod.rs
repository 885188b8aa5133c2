//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient) and the
//! seams the order service talks through.

pub mod order_client;
pub mod product_client;
pub mod validator;

pub use order_client::*;
pub use product_client::*;
pub use validator::*;
