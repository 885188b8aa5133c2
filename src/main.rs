//! Starts the order service, runs one order through every command and shuts down.

use order_service::config::{AppConfig, DEFAULT_CONFIG_FILE};
use order_service::model::OrderStatus;
use order_service::rpc::{
    ChangeOrderStatusDto, CreateOrderDto, FindOneOrderDto, OrderItemDto, OrderPaginationDto,
    RpcError,
};
use order_service::runtime::{setup_tracing, OrderSystem};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(DEFAULT_CONFIG_FILE)?;
    setup_tracing(&config.telemetry.log_level);

    info!(service = %config.service_name, "Starting application");
    let system = OrderSystem::start(&config).await?;

    let items: Vec<OrderItemDto> = config
        .catalog
        .products
        .iter()
        .filter_map(|product| product.id.as_ref())
        .zip(1..)
        .map(|(id, quantity)| OrderItemDto {
            product_id: id.to_string(),
            quantity,
        })
        .collect();

    if items.is_empty() {
        info!("Catalog has no products with fixed ids, nothing to order");
    } else {
        let span = tracing::info_span!("order_processing");
        let result = async {
            let created = system
                .order_client
                .create_order(CreateOrderDto { items })
                .await?;
            info!(order_id = %created.id, total_amount = %created.total_amount, "Order placed");

            let paid = system
                .order_client
                .change_order_status(ChangeOrderStatusDto {
                    id: created.id.to_string(),
                    status: OrderStatus::Paid,
                })
                .await?;
            info!(order_id = %paid.id, status = %paid.status, "Order paid");

            let fetched = system
                .order_client
                .find_one_order(FindOneOrderDto {
                    id: created.id.to_string(),
                })
                .await?;
            for item in &fetched.items {
                info!(product = %item.name, quantity = item.quantity, price = %item.price, "Line");
            }

            let page = system
                .order_client
                .find_all_orders(OrderPaginationDto::default())
                .await?;
            info!(total = page.meta.total, last_page = page.meta.last_page, "Orders listed");
            Ok::<_, RpcError>(())
        }
        .instrument(span)
        .await;

        if let Err(e) = result {
            error!(status = %e.status, message = %e.message, "Order processing failed");
        }
    }

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
