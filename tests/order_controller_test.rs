use actor_framework::mock::MockClient;
use actor_framework::FrameworkError;
use order_service::clients::ProductClient;
use order_service::config::OrderSettings;
use order_service::model::{OrderStatus, Product, ProductId};
use order_service::order_actor;
use order_service::rpc::{
    CreateOrderDto, FindOneOrderDto, OrderController, OrderItemDto, OrderPaginationDto, RpcStatus,
};
use order_service::service::OrderService;
use order_service::store::MemoryOrderStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn create_dto(product_id: &str, quantity: i64) -> CreateOrderDto {
    CreateOrderDto {
        items: vec![OrderItemDto {
            product_id: product_id.to_string(),
            quantity,
        }],
    }
}

/// Real controller, service and order actor; the product service is mocked.
#[tokio::test]
async fn test_controller_with_mocked_product_service() {
    let mut product_mock = MockClient::<Product>::new();

    // create_order validates once, find_one_order looks the names up again
    product_mock
        .expect_get_many(vec![ProductId::from("p1")])
        .return_ok(vec![Product::new("p1", "Widget", Decimal::new(1250, 2))]);
    product_mock
        .expect_get_many(vec![ProductId::from("p1")])
        .return_ok(vec![Product::new("p1", "Widget", Decimal::new(1250, 2))]);

    let products = ProductClient::new(product_mock.client(), Duration::from_secs(1));
    let (order_actor, orders) = order_actor::new(16);
    let order_handle = tokio::spawn(order_actor.run(()));

    let service = OrderService::new(
        Arc::new(MemoryOrderStore::new(orders)),
        Arc::new(products),
        OrderSettings::default(),
    );
    let (controller, client) = OrderController::new(service, 8);
    let controller_handle = tokio::spawn(controller.run(CancellationToken::new()));

    let created = client.create_order(create_dto("p1", 4)).await.unwrap();
    assert_eq!(created.total_amount, Decimal::from(50));
    assert_eq!(created.status, OrderStatus::Pending);

    let fetched = client
        .find_one_order(FindOneOrderDto {
            id: created.id.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(fetched, created);

    product_mock.verify();

    // Cleanup: the controller owns the service, which owns the order actor's client
    drop(client);
    controller_handle.await.unwrap();
    order_handle.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_product_service_fails_validation() {
    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_get_many(vec![ProductId::from("p1")])
        .return_err(FrameworkError::ActorClosed);

    let products = ProductClient::new(product_mock.client(), Duration::from_secs(1));
    let (order_actor, orders) = order_actor::new(16);
    tokio::spawn(order_actor.run(()));

    let service = OrderService::new(
        Arc::new(MemoryOrderStore::new(orders)),
        Arc::new(products),
        OrderSettings::default(),
    );
    let (controller, client) = OrderController::new(service, 8);
    tokio::spawn(controller.run(CancellationToken::new()));

    let error = client.create_order(create_dto("p1", 1)).await.unwrap_err();
    assert_eq!(error.status, RpcStatus::ValidationFailed);

    let page = client
        .find_all_orders(OrderPaginationDto::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn test_invalid_payload_never_reaches_the_product_service() {
    // No expectations: any product lookup would fail the test.
    let product_mock = MockClient::<Product>::new();

    let products = ProductClient::new(product_mock.client(), Duration::from_secs(1));
    let (order_actor, orders) = order_actor::new(16);
    tokio::spawn(order_actor.run(()));

    let service = OrderService::new(
        Arc::new(MemoryOrderStore::new(orders)),
        Arc::new(products),
        OrderSettings::default(),
    );
    let (controller, client) = OrderController::new(service, 8);
    tokio::spawn(controller.run(CancellationToken::new()));

    let error = client.create_order(create_dto("p1", 0)).await.unwrap_err();
    assert_eq!(error.status, RpcStatus::BadRequest);

    product_mock.verify();
}

#[tokio::test]
async fn test_client_without_controller_is_unavailable() {
    let (order_actor, orders) = order_actor::new(16);
    tokio::spawn(order_actor.run(()));
    let product_mock = MockClient::<Product>::new();

    let service = OrderService::new(
        Arc::new(MemoryOrderStore::new(orders)),
        Arc::new(ProductClient::new(product_mock.client(), Duration::from_secs(1))),
        OrderSettings::default(),
    );
    let (controller, client) = OrderController::new(service, 8);
    drop(controller);

    let error = client
        .find_all_orders(OrderPaginationDto::default())
        .await
        .unwrap_err();
    assert_eq!(error.status, RpcStatus::Unavailable);
}

#[tokio::test]
async fn test_cancelled_controller_stops_while_clients_remain() {
    let (order_actor, orders) = order_actor::new(16);
    let order_handle = tokio::spawn(order_actor.run(()));
    let product_mock = MockClient::<Product>::new();

    let service = OrderService::new(
        Arc::new(MemoryOrderStore::new(orders)),
        Arc::new(ProductClient::new(product_mock.client(), Duration::from_secs(1))),
        OrderSettings::default(),
    );
    let (controller, client) = OrderController::new(service, 8);
    let shutdown = CancellationToken::new();
    let controller_handle = tokio::spawn(controller.run(shutdown.clone()));
    let held_elsewhere = client.clone();

    let page = held_elsewhere
        .find_all_orders(OrderPaginationDto::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 0);

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(1), controller_handle)
        .await
        .expect("controller kept running after cancellation")
        .unwrap();

    let error = held_elsewhere
        .find_all_orders(OrderPaginationDto::default())
        .await
        .unwrap_err();
    assert_eq!(error.status, RpcStatus::Unavailable);

    // The service went down with the controller, releasing the order actor.
    tokio::time::timeout(Duration::from_secs(1), order_handle)
        .await
        .expect("order actor kept running")
        .unwrap();
}
