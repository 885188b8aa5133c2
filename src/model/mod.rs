//! Pure data structures: orders, their items, and products as the product service reports them.

pub mod order;
pub mod product;

pub use order::*;
pub use product::*;
