use crate::clients::{OrderClient, ProductClient};
use crate::config::{AppConfig, OrderSettings, ProductServiceSettings};
use crate::model::{Product, ProductCreate};
use crate::order_actor;
use crate::product_actor::{self, ProductError};
use crate::rpc::OrderController;
use crate::service::OrderService;
use crate::store::{MemoryOrderStore, OrderStore, PgOrderStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const CONTROLLER_BUFFER: usize = 32;
const ORDER_ACTOR_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Order store could not be opened: {0}")]
    Store(#[from] StoreError),

    #[error("Product catalog could not be seeded: {0}")]
    Catalog(#[from] ProductError),

    #[error("{task} task failed: {reason}")]
    TaskFailed { task: &'static str, reason: String },
}

/// The running order service.
///
/// # Architecture
///
/// - **Product actor**: the in-process product service answering `validate_products`
/// - **Order store**: PostgreSQL when `database` is configured, otherwise an order actor
/// - **Order controller**: serves the order commands through [`OrderService`]
///
/// ```ignore
/// let system = OrderSystem::start(&config).await?;
/// system.seed_catalog(&config.catalog.products).await?;
///
/// let order = system.order_client.create_order(dto).await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    /// Entry point for order commands.
    pub order_client: OrderClient,

    /// Catalog management of the in-process product service.
    ///
    /// The product actor stops once every clone of this client is dropped.
    pub product_client: ProductClient,

    cancel: CancellationToken,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl OrderSystem {
    /// Starts the system described by `config` and seeds its product catalog.
    pub async fn start(config: &AppConfig) -> Result<Self, SystemError> {
        let mut handles = Vec::new();
        let product_client = spawn_product_service(&config.product_service, &mut handles);

        let store: Arc<dyn OrderStore> = match &config.database {
            Some(database) => {
                let store = PgOrderStore::connect(database).await?;
                store.migrate().await?;
                Arc::new(store)
            }
            None => {
                info!("No database configured, keeping orders in memory");
                Arc::new(spawn_memory_store(&mut handles))
            }
        };

        let system = Self::assemble(store, product_client, config.orders, handles);
        system.seed_catalog(&config.catalog.products).await?;
        info!(service = %config.service_name, "Order system started");
        Ok(system)
    }

    /// A fully in-memory system, for tests and demos. Must be called inside a Tokio runtime.
    pub fn in_memory(product_service: &ProductServiceSettings, orders: OrderSettings) -> Self {
        let mut handles = Vec::new();
        let product_client = spawn_product_service(product_service, &mut handles);
        let store = Arc::new(spawn_memory_store(&mut handles));
        Self::assemble(store, product_client, orders, handles)
    }

    fn assemble(
        store: Arc<dyn OrderStore>,
        product_client: ProductClient,
        orders: OrderSettings,
        mut handles: Vec<(&'static str, JoinHandle<()>)>,
    ) -> Self {
        let service = OrderService::new(store, Arc::new(product_client.clone()), orders);
        let (controller, order_client) = OrderController::new(service, CONTROLLER_BUFFER);
        let cancel = CancellationToken::new();
        handles.push((
            "order controller",
            tokio::spawn(controller.run(cancel.child_token())),
        ));

        Self {
            order_client,
            product_client,
            cancel,
            handles,
        }
    }

    /// Registers products with the in-process product service.
    pub async fn seed_catalog(
        &self,
        products: &[ProductCreate],
    ) -> Result<Vec<Product>, ProductError> {
        let mut seeded = Vec::with_capacity(products.len());
        for params in products {
            seeded.push(self.product_client.create_product(params.clone()).await?);
        }
        if !seeded.is_empty() {
            info!(count = seeded.len(), "Product catalog seeded");
        }
        Ok(seeded)
    }

    /// Gracefully shuts down the system.
    ///
    /// The controller is cancelled, so clones of `order_client` held elsewhere don't keep it
    /// alive; they get `UNAVAILABLE` afterwards. Once it has drained, the service it owned
    /// is gone and the actors end as their channels close. Fails if any task panicked.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        self.cancel.cancel();
        drop(self.order_client);
        drop(self.product_client);

        let mut failure = None;
        for (task, handle) in self.handles.into_iter().rev() {
            if let Err(e) = handle.await {
                error!(task, error = %e, "Task failed");
                failure.get_or_insert(SystemError::TaskFailed {
                    task,
                    reason: e.to_string(),
                });
            }
        }

        match failure {
            Some(e) => Err(e),
            None => {
                info!("System shutdown complete.");
                Ok(())
            }
        }
    }
}

fn spawn_product_service(
    settings: &ProductServiceSettings,
    handles: &mut Vec<(&'static str, JoinHandle<()>)>,
) -> ProductClient {
    let (actor, client) = product_actor::new(settings.channel_capacity);
    handles.push(("product actor", tokio::spawn(actor.run(()))));
    ProductClient::new(client, settings.timeout())
}

fn spawn_memory_store(handles: &mut Vec<(&'static str, JoinHandle<()>)>) -> MemoryOrderStore {
    let (actor, client) = order_actor::new(ORDER_ACTOR_BUFFER);
    handles.push(("order actor", tokio::spawn(actor.run(()))));
    MemoryOrderStore::new(client)
}
