//! PostgreSQL order store.

use super::{OrderStore, StoreError};
use crate::config::DatabaseSettings;
use crate::model::{NewOrder, Order, OrderFilter, OrderId, OrderItem, OrderStatus, ProductId};
use actor_framework::Page;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::postgres::{PgExecutor, PgPoolOptions};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const ORDER_COLUMNS: &str = "id, total_amount, total_items, status, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    total_amount: Decimal,
    total_items: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_id: Uuid,
    product_id: String,
    quantity: i64,
    price: Decimal,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, StoreError> {
        let corrupt = |reason: String| StoreError::Corrupt {
            id: self.id.to_string(),
            reason,
        };
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|e| corrupt(e.to_string()))?;
        let total_items = u32::try_from(self.total_items)
            .map_err(|_| corrupt(format!("total_items out of range: {}", self.total_items)))?;

        Ok(Order {
            id: OrderId(self.id),
            total_amount: self.total_amount,
            total_items,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items,
        })
    }
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = StoreError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(row.quantity).map_err(|_| StoreError::Corrupt {
            id: row.order_id.to_string(),
            reason: format!("item quantity out of range: {}", row.quantity),
        })?;
        Ok(OrderItem {
            product_id: ProductId(row.product_id),
            quantity,
            price: row.price,
        })
    }
}

/// Items of the given orders, grouped by order, each group in line order.
async fn fetch_items<'e>(
    executor: impl PgExecutor<'e>,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<OrderItem>>, StoreError> {
    let rows = sqlx::query_as::<_, OrderItemRow>(
        "SELECT order_id, product_id, quantity, price
         FROM order_items WHERE order_id = ANY($1)
         ORDER BY order_id, position",
    )
    .bind(ids)
    .fetch_all(executor)
    .await?;

    let mut grouped: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    for row in rows {
        let order_id = row.order_id;
        grouped.entry(order_id).or_default().push(row.try_into()?);
    }
    Ok(grouped)
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Order store over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool and verifies the database answers.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.connect_timeout())
            .connect(settings.url.expose_secret())
            .await?;
        info!(max_connections = settings.max_connections, "Connected to order database");
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Order schema up to date");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn with_items(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, StoreError> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut items = fetch_items(&self.pool, &ids).await?;
        rows.into_iter()
            .map(|row| {
                let order_items = items.remove(&row.id).unwrap_or_default();
                row.into_order(order_items)
            })
            .collect()
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    #[instrument(skip_all, fields(items = order.items.len()))]
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError> {
        let id = OrderId::generate();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders (id, total_amount, total_items, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id.0)
        .bind(order.total_amount)
        .bind(i64::from(order.total_items))
        .bind(order.status.as_str())
        .fetch_one(&mut *tx)
        .await?;

        if !order.items.is_empty() {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO order_items (order_id, position, product_id, quantity, price) ",
            );
            builder.push_values(order.items.iter().zip(0i32..), |mut values, (item, position)| {
                values
                    .push_bind(id.0)
                    .push_bind(position)
                    .push_bind(item.product_id.as_str().to_string())
                    .push_bind(i64::from(item.quantity))
                    .push_bind(item.price);
            });
            builder.build().execute(&mut *tx).await?;
        }

        // Reply with the rows as stored.
        let stored_items = fetch_items(&mut *tx, &[id.0])
            .await?
            .remove(&id.0)
            .unwrap_or_default();

        tx.commit().await?;
        debug!(order_id = %id, "Order inserted");
        row.into_order(stored_items)
    }

    #[instrument(skip(self))]
    async fn find_page(
        &self,
        filter: OrderFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Page<Order>, StoreError> {
        let status = filter.status.map(|status| status.as_str());

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY seq
             LIMIT $2 OFFSET $3"
        ))
        .bind(status)
        .bind(to_i64(limit))
        .bind(to_i64(offset))
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            items: self.with_items(rows).await?,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_items(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, StoreError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $2, updated_at = now()
             WHERE id = $1
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id.0)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))?;

        self.with_items(vec![row])
            .await?
            .pop()
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: &str, quantity: u32, price: Decimal) -> OrderItem {
        OrderItem {
            product_id: ProductId::from(product),
            quantity,
            price,
        }
    }

    fn new_order(items: Vec<OrderItem>) -> NewOrder {
        NewOrder::new(OrderStatus::Pending, items).unwrap()
    }

    async fn order_count(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a PostgreSQL DATABASE_URL"]
    async fn test_insert_and_find_by_id(pool: PgPool) {
        let store = PgOrderStore::new(pool);

        let inserted = store
            .insert(new_order(vec![
                line("p2", 1, Decimal::from(5)),
                line("p1", 2, Decimal::from(10)),
            ]))
            .await
            .unwrap();
        assert_eq!(inserted.total_amount, Decimal::from(25));
        assert_eq!(inserted.total_items, 3);
        assert_eq!(inserted.status, OrderStatus::Pending);

        let found = store.find_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(found, inserted);
        assert_eq!(found.items[0].product_id, ProductId::from("p2"));
        assert_eq!(found.items[1].product_id, ProductId::from("p1"));

        assert!(store
            .find_by_id(OrderId::generate())
            .await
            .unwrap()
            .is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a PostgreSQL DATABASE_URL"]
    async fn test_price_snapshot_keeps_every_decimal_place(pool: PgPool) {
        let store = PgOrderStore::new(pool);

        let inserted = store
            .insert(new_order(vec![line("p1", 3, Decimal::new(125, 3))]))
            .await
            .unwrap();
        assert_eq!(inserted.total_amount, Decimal::new(375, 3));
        assert_eq!(inserted.items[0].price, Decimal::new(125, 3));

        let found = store.find_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(found.items[0].price, Decimal::new(125, 3));
        let recomputed = found.items[0].subtotal().unwrap();
        assert_eq!(recomputed, found.total_amount);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a PostgreSQL DATABASE_URL"]
    async fn test_failed_item_insert_leaves_no_order(pool: PgPool) {
        let store = PgOrderStore::new(pool.clone());

        // Second line violates the positive-quantity check.
        let result = store
            .insert(new_order(vec![
                line("p1", 1, Decimal::from(10)),
                line("p2", 0, Decimal::from(5)),
            ]))
            .await;

        assert!(matches!(result, Err(StoreError::Database(_))));
        assert_eq!(order_count(&pool).await, 0);
        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(items, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a PostgreSQL DATABASE_URL"]
    async fn test_find_page_orders_by_creation_and_filters(pool: PgPool) {
        let store = PgOrderStore::new(pool);

        let mut ids = Vec::new();
        for i in 1..=5u32 {
            let order = store
                .insert(new_order(vec![
                    line("p1", i, Decimal::from(10)),
                    line("p2", 1, Decimal::from(5)),
                ]))
                .await
                .unwrap();
            ids.push(order.id);
        }
        store.update_status(ids[1], OrderStatus::Paid).await.unwrap();
        store.update_status(ids[3], OrderStatus::Paid).await.unwrap();

        let page = store.find_page(OrderFilter::default(), 1, 2).await.unwrap();
        assert_eq!(page.total, 5);
        let listed: Vec<OrderId> = page.items.iter().map(|order| order.id).collect();
        assert_eq!(listed, vec![ids[1], ids[2]]);
        // Items stay with their own order.
        assert_eq!(page.items[0].items.len(), 2);
        assert_eq!(page.items[0].items[0].quantity, 2);
        assert_eq!(page.items[1].items[0].quantity, 3);

        let paid = store
            .find_page(
                OrderFilter {
                    status: Some(OrderStatus::Paid),
                },
                0,
                10,
            )
            .await
            .unwrap();
        assert_eq!(paid.total, 2);
        let listed: Vec<OrderId> = paid.items.iter().map(|order| order.id).collect();
        assert_eq!(listed, vec![ids[1], ids[3]]);

        let past_end = store.find_page(OrderFilter::default(), 10, 10).await.unwrap();
        assert_eq!(past_end.total, 5);
        assert!(past_end.items.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a PostgreSQL DATABASE_URL"]
    async fn test_update_status(pool: PgPool) {
        let store = PgOrderStore::new(pool);
        let order = store
            .insert(new_order(vec![line("p1", 2, Decimal::from(10))]))
            .await
            .unwrap();

        let delivered = store
            .update_status(order.id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert_eq!(delivered.items, order.items);
        assert_eq!(delivered.total_amount, order.total_amount);
        assert!(delivered.updated_at >= order.updated_at);

        let missing = OrderId::generate();
        assert_eq!(
            store.update_status(missing, OrderStatus::Paid).await,
            Err(StoreError::NotFound(missing))
        );
    }
}
