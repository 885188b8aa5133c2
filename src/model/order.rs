use crate::model::{Product, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Lifecycle state of an order.
///
/// The set is flat: any status may be changed into any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A line of an order. `price` is the unit price copied from the product service when the
/// order was placed and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

impl OrderItem {
    /// `price * quantity`, or `None` if it exceeds the decimal range.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Represents a placed order.
///
/// # Actor Framework
/// Implements [`ActorEntity`](actor_framework::ActorEntity) for the in-memory store; see
/// [`crate::order_actor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub total_amount: Decimal,
    pub total_items: u32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Materializes a new order under `id`, stamped with the current time.
    pub fn from_new(id: OrderId, new_order: NewOrder) -> Self {
        let now = Utc::now();
        Self {
            id,
            total_amount: new_order.total_amount,
            total_items: new_order.total_items,
            status: new_order.status,
            created_at: now,
            updated_at: now,
            items: new_order.items,
        }
    }

    /// Distinct product ids of the items, in first-seen order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        distinct_product_ids(self.items.iter().map(|item| &item.product_id))
    }
}

/// Why a set of priced items can't form an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TotalsError {
    #[error("total item quantity is too large")]
    ItemCountOverflow,

    #[error("order amount is too large")]
    AmountOverflow,
}

/// A priced order that has not been stored yet. The totals are fixed here, once.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub total_items: u32,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    /// Fails when the summed quantity or amount doesn't fit its type.
    pub fn new(status: OrderStatus, items: Vec<OrderItem>) -> Result<Self, TotalsError> {
        let total_items = items
            .iter()
            .try_fold(0u32, |acc, item| acc.checked_add(item.quantity))
            .ok_or(TotalsError::ItemCountOverflow)?;
        let total_amount = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.subtotal()?))
            .ok_or(TotalsError::AmountOverflow)?;

        Ok(Self {
            status,
            total_amount,
            total_items,
            items,
        })
    }
}

/// One requested line of a new order, before pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Selection criteria for listing orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.status.map_or(true, |status| status == order.status)
    }
}

/// An order item as returned to callers, carrying the product name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// An order as returned to callers: stored data plus product names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: OrderId,
    pub total_amount: Decimal,
    pub total_items: u32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}

impl OrderView {
    /// Name-only product records recovered from the view's items.
    pub fn products(&self) -> Vec<Product> {
        self.items
            .iter()
            .map(|item| Product::new(item.product_id.clone(), item.name.clone(), item.price))
            .collect()
    }
}

/// Deduplicates ids, keeping the first occurrence of each.
pub fn distinct_product_ids<'a>(ids: impl IntoIterator<Item = &'a ProductId>) -> Vec<ProductId> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}
