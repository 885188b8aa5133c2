use super::catalog::Catalog;
use super::pagination::{OrderPage, PageMeta, PageQuery, Window};
use super::OrderError;
use crate::clients::ProductValidator;
use crate::config::OrderSettings;
use crate::model::{
    distinct_product_ids, ItemRequest, NewOrder, OrderFilter, OrderId, OrderItem, OrderStatus,
    OrderView,
};
use crate::store::OrderStore;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Creates, lists, reads and transitions orders.
///
/// Cheap to clone; every clone shares the same store and validator.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    products: Arc<dyn ProductValidator>,
    settings: OrderSettings,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        products: Arc<dyn ProductValidator>,
        settings: OrderSettings,
    ) -> Self {
        Self {
            store,
            products,
            settings,
        }
    }

    pub fn settings(&self) -> &OrderSettings {
        &self.settings
    }

    /// Validates the requested products in one call, prices the items with the returned
    /// prices and stores the order.
    ///
    /// Nothing is stored unless every product resolves.
    #[instrument(skip_all, fields(items = items.len()))]
    pub async fn create(&self, items: Vec<ItemRequest>) -> Result<OrderView, OrderError> {
        if items.is_empty() {
            return Err(OrderError::InvalidRequest(
                "an order needs at least one item".into(),
            ));
        }
        if let Some(item) = items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::InvalidRequest(format!(
                "quantity for product {} must be positive",
                item.product_id
            )));
        }

        let product_ids = distinct_product_ids(items.iter().map(|item| &item.product_id));
        let products = self
            .products
            .validate_products(&product_ids)
            .await
            .inspect_err(|e| warn!(error = %e, "Product validation failed"))?;
        let catalog = Catalog::new(products);

        let priced = items
            .into_iter()
            .map(|item| {
                Ok(OrderItem {
                    price: catalog.price(&item.product_id)?,
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
            })
            .collect::<Result<Vec<_>, OrderError>>()?;

        let new_order = NewOrder::new(self.settings.default_status, priced)
            .map_err(|e| OrderError::InvalidRequest(e.to_string()))?;

        let order = self.store.insert(new_order).await?;
        info!(
            order_id = %order.id,
            total_amount = %order.total_amount,
            total_items = order.total_items,
            "Order created"
        );
        catalog.enrich(order)
    }

    /// One page of orders, oldest first, optionally restricted to one status.
    #[instrument(skip(self))]
    pub async fn find_all(&self, query: PageQuery) -> Result<OrderPage, OrderError> {
        let window = Window::resolve(
            query.page,
            query.limit,
            self.settings.default_limit,
            self.settings.max_limit,
        )?;

        let page = self
            .store
            .find_page(
                OrderFilter {
                    status: query.status,
                },
                window.offset,
                window.limit,
            )
            .await?;
        debug!(total = page.total, returned = page.items.len(), "Orders listed");

        Ok(OrderPage {
            data: page.items,
            meta: PageMeta::new(page.total, window.page, window.limit),
        })
    }

    /// The order with product names resolved freshly from the product service.
    #[instrument(skip(self))]
    pub async fn find_one(&self, id: OrderId) -> Result<OrderView, OrderError> {
        let order = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        let products = self
            .products
            .validate_products(&order.product_ids())
            .await
            .inspect_err(|e| warn!(order_id = %id, error = %e, "Product lookup failed"))?;
        Catalog::new(products).enrich(order)
    }

    /// Moves the order to `status`. Asking for the current status changes nothing and
    /// returns the order as it is.
    #[instrument(skip(self))]
    pub async fn change_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<OrderView, OrderError> {
        let current = self.find_one(id).await?;
        if current.status == status {
            debug!(order_id = %id, %status, "Status unchanged");
            return Ok(current);
        }

        let updated = self.store.update_status(id, status).await?;
        info!(order_id = %id, from = %current.status, to = %status, "Order status changed");
        Catalog::new(current.products()).enrich(updated)
    }
}
