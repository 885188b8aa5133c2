use super::{OrderStore, StoreError};
use crate::model::{NewOrder, Order, OrderFilter, OrderId, OrderStatus};
use actor_framework::{FrameworkError, Page, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Order store backed by the order actor.
#[derive(Clone)]
pub struct MemoryOrderStore {
    inner: ResourceClient<Order>,
}

impl MemoryOrderStore {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    #[instrument(skip_all, fields(items = order.items.len()))]
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError> {
        debug!("Sending request");
        Ok(self.inner.create(order).await?)
    }

    #[instrument(skip(self))]
    async fn find_page(
        &self,
        filter: OrderFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Page<Order>, StoreError> {
        debug!("Sending request");
        Ok(self.inner.list(filter, offset, limit).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        debug!("Sending request");
        Ok(self.inner.get(id).await?)
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, StoreError> {
        debug!("Sending request");
        match self.inner.update(id, status).await {
            Ok(order) => Ok(order),
            Err(FrameworkError::NotFound(_)) => Err(StoreError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderItem, ProductId};
    use crate::order_actor;
    use actor_framework::mock::{create_mock_client, expect_get, expect_update, MockClient};
    use rust_decimal::Decimal;

    fn new_order(status: OrderStatus) -> NewOrder {
        NewOrder::new(
            status,
            vec![OrderItem {
                product_id: ProductId::from("p1"),
                quantity: 2,
                price: Decimal::from(10),
            }],
        )
        .unwrap()
    }

    fn spawn_store() -> MemoryOrderStore {
        let (actor, client) = order_actor::new(16);
        tokio::spawn(actor.run(()));
        MemoryOrderStore::new(client)
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = spawn_store();

        let created = store.insert(new_order(OrderStatus::Pending)).await.unwrap();
        assert_eq!(created.total_amount, Decimal::from(20));
        assert_eq!(created.created_at, created.updated_at);

        let found = store.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert_eq!(store.find_by_id(OrderId::generate()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_page_filters_by_status_in_creation_order() {
        let store = spawn_store();
        let first = store.insert(new_order(OrderStatus::Paid)).await.unwrap();
        store.insert(new_order(OrderStatus::Pending)).await.unwrap();
        let third = store.insert(new_order(OrderStatus::Paid)).await.unwrap();

        let page = store
            .find_page(
                OrderFilter {
                    status: Some(OrderStatus::Paid),
                },
                0,
                10,
            )
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        let ids: Vec<OrderId> = page.items.iter().map(|order| order.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }

    #[tokio::test]
    async fn test_update_status_bumps_updated_at() {
        let store = spawn_store();
        let created = store.insert(new_order(OrderStatus::Pending)).await.unwrap();

        let updated = store
            .update_status(created.id, OrderStatus::Delivered)
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Delivered);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.items, created.items);
    }

    #[tokio::test]
    async fn test_update_status_unknown_order() {
        let store = spawn_store();
        let missing = OrderId::generate();

        let result = store.update_status(missing, OrderStatus::Paid).await;
        assert_eq!(result, Err(StoreError::NotFound(missing)));
    }

    #[tokio::test]
    async fn test_closed_actor_is_unavailable() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_list().return_err(FrameworkError::ActorClosed);

        let store = MemoryOrderStore::new(mock.client());
        let result = store.find_page(OrderFilter::default(), 0, 10).await;

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_requests_carry_order_id_and_status() {
        let (client, mut receiver) = create_mock_client::<Order>(4);
        let store = MemoryOrderStore::new(client);
        let order = Order::from_new(OrderId::generate(), new_order(OrderStatus::Pending));
        let id = order.id;

        let lookup = tokio::spawn({
            let store = store.clone();
            async move { store.find_by_id(id).await }
        });
        let (requested, responder) = expect_get(&mut receiver)
            .await
            .expect("Expected Get request");
        assert_eq!(requested, id);
        responder.send(Ok(Some(order.clone()))).unwrap();
        assert_eq!(lookup.await.unwrap(), Ok(Some(order)));

        let change =
            tokio::spawn(async move { store.update_status(id, OrderStatus::Cancelled).await });
        let (requested, status, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(requested, id);
        assert_eq!(status, OrderStatus::Cancelled);
        responder
            .send(Err(FrameworkError::NotFound(id.to_string())))
            .unwrap();
        assert_eq!(change.await.unwrap(), Err(StoreError::NotFound(id)));
    }
}
