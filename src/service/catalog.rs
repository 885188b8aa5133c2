use super::OrderError;
use crate::model::{Order, OrderItemView, OrderView, Product, ProductId};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Products from one validation response, looked up by id.
pub(crate) struct Catalog {
    products: HashMap<ProductId, Product>,
}

impl Catalog {
    pub(crate) fn new(products: Vec<Product>) -> Self {
        Self {
            products: products
                .into_iter()
                .map(|product| (product.id.clone(), product))
                .collect(),
        }
    }

    fn lookup(&self, id: &ProductId) -> Result<&Product, OrderError> {
        self.products.get(id).ok_or_else(|| {
            OrderError::ValidationFailed(format!("Product {id} missing from validation response"))
        })
    }

    pub(crate) fn price(&self, id: &ProductId) -> Result<Decimal, OrderError> {
        self.lookup(id).map(|product| product.price)
    }

    /// Joins product names onto the stored order. Prices and totals are the stored ones.
    pub(crate) fn enrich(&self, order: Order) -> Result<OrderView, OrderError> {
        let items = order
            .items
            .into_iter()
            .map(|item| {
                let name = self.lookup(&item.product_id)?.name.clone();
                Ok(OrderItemView {
                    product_id: item.product_id,
                    name,
                    quantity: item.quantity,
                    price: item.price,
                })
            })
            .collect::<Result<Vec<_>, OrderError>>()?;

        Ok(OrderView {
            id: order.id,
            total_amount: order.total_amount,
            total_items: order.total_items,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
            items,
        })
    }
}
