use super::OrderError;
use crate::model::{Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// A listing request as the service receives it. `limit` falls back to the configured
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u64,
    pub limit: Option<u64>,
    pub status: Option<OrderStatus>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub last_page: u64,
}

impl PageMeta {
    /// `last_page` is `ceil(total / limit)`; an empty listing has no pages.
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        Self {
            total,
            page,
            last_page: total.div_ceil(limit.max(1)),
        }
    }
}

/// One page of orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    pub data: Vec<Order>,
    pub meta: PageMeta,
}

/// A validated window into the order listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub page: u64,
    pub limit: u64,
    pub offset: u64,
}

impl Window {
    pub(crate) fn resolve(
        page: u64,
        limit: Option<u64>,
        default_limit: u64,
        max_limit: u64,
    ) -> Result<Self, OrderError> {
        let limit = limit.unwrap_or(default_limit);
        if page == 0 {
            return Err(OrderError::InvalidRequest("page must be at least 1".into()));
        }
        if limit == 0 || limit > max_limit {
            return Err(OrderError::InvalidRequest(format!(
                "limit must be between 1 and {max_limit}, got {limit}"
            )));
        }
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| OrderError::InvalidRequest(format!("page {page} is out of range")))?;

        Ok(Self {
            page,
            limit,
            offset,
        })
    }
}
