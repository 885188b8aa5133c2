//! Request payloads of the order commands. Each one checks its own shape and turns into
//! the service's input types; a malformed payload is a `BAD_REQUEST`.

use super::RpcError;
use crate::model::{ItemRequest, OrderId, OrderStatus, ProductId};
use crate::service::PageQuery;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderDto {
    pub items: Vec<OrderItemDto>,
}

impl CreateOrderDto {
    pub fn validate(self) -> Result<Vec<ItemRequest>, RpcError> {
        if self.items.is_empty() {
            return Err(RpcError::bad_request("items must not be empty"));
        }
        self.items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if item.product_id.trim().is_empty() {
                    return Err(RpcError::bad_request(format!(
                        "items[{index}].productId must not be empty"
                    )));
                }
                let quantity = u32::try_from(item.quantity)
                    .ok()
                    .filter(|quantity| *quantity > 0)
                    .ok_or_else(|| {
                        RpcError::bad_request(format!(
                            "items[{index}].quantity must be a positive number, got {}",
                            item.quantity
                        ))
                    })?;
                Ok(ItemRequest {
                    product_id: ProductId(item.product_id),
                    quantity,
                })
            })
            .collect()
    }
}

fn first_page() -> u64 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPaginationDto {
    #[serde(default = "first_page")]
    pub page: u64,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

impl Default for OrderPaginationDto {
    fn default() -> Self {
        Self {
            page: first_page(),
            limit: None,
            status: None,
        }
    }
}

impl OrderPaginationDto {
    pub fn validate(self) -> Result<PageQuery, RpcError> {
        if self.page == 0 {
            return Err(RpcError::bad_request("page must be at least 1"));
        }
        if self.limit == Some(0) {
            return Err(RpcError::bad_request("limit must be at least 1"));
        }
        Ok(PageQuery {
            page: self.page,
            limit: self.limit,
            status: self.status,
        })
    }
}

fn parse_order_id(id: &str) -> Result<OrderId, RpcError> {
    id.parse()
        .map_err(|_| RpcError::bad_request(format!("id must be a UUID, got {id:?}")))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindOneOrderDto {
    pub id: String,
}

impl FindOneOrderDto {
    pub fn validate(self) -> Result<OrderId, RpcError> {
        parse_order_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeOrderStatusDto {
    pub id: String,
    pub status: OrderStatus,
}

impl ChangeOrderStatusDto {
    pub fn validate(self) -> Result<(OrderId, OrderStatus), RpcError> {
        Ok((parse_order_id(&self.id)?, self.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::RpcStatus;
    use serde_json::json;

    #[test]
    fn test_create_dto_from_wire() {
        let dto: CreateOrderDto = serde_json::from_value(json!({
            "items": [
                { "productId": "p1", "quantity": 2 },
                { "productId": "p2", "quantity": 1 }
            ]
        }))
        .unwrap();

        let items = dto.validate().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, ProductId::from("p1"));
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_create_dto_rejects_bad_quantities() {
        for quantity in [0, -3, i64::from(u32::MAX) + 1] {
            let dto = CreateOrderDto {
                items: vec![OrderItemDto {
                    product_id: "p1".into(),
                    quantity,
                }],
            };
            let error = dto.validate().unwrap_err();
            assert_eq!(error.status, RpcStatus::BadRequest);
        }
    }

    #[test]
    fn test_create_dto_rejects_empty_items() {
        let error = CreateOrderDto { items: vec![] }.validate().unwrap_err();
        assert_eq!(error.status, RpcStatus::BadRequest);
    }

    #[test]
    fn test_pagination_defaults() {
        let dto: OrderPaginationDto = serde_json::from_value(json!({})).unwrap();
        assert_eq!(dto, OrderPaginationDto::default());

        let dto: OrderPaginationDto =
            serde_json::from_value(json!({ "page": 2, "limit": 5, "status": "PAID" })).unwrap();
        let query = dto.validate().unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.status, Some(OrderStatus::Paid));
    }

    #[test]
    fn test_pagination_rejects_zero() {
        let zero_page = OrderPaginationDto {
            page: 0,
            ..OrderPaginationDto::default()
        };
        assert!(zero_page.validate().is_err());

        let zero_limit = OrderPaginationDto {
            limit: Some(0),
            ..OrderPaginationDto::default()
        };
        assert!(zero_limit.validate().is_err());
    }

    #[test]
    fn test_ids_must_be_uuids() {
        let error = FindOneOrderDto {
            id: "order_1".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(error.status, RpcStatus::BadRequest);

        let id = OrderId::generate();
        let (parsed, status) = ChangeOrderStatusDto {
            id: id.to_string(),
            status: OrderStatus::Cancelled,
        }
        .validate()
        .unwrap();
        assert_eq!(parsed, id);
        assert_eq!(status, OrderStatus::Cancelled);
    }
}
