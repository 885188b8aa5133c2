//! # Order Controller
//!
//! The command surface of the service. The controller is an actor: an
//! [`OrderClient`](crate::clients::OrderClient) sends it an [`OrderCommand`] with a oneshot
//! reply channel, and the controller answers with the result or an [`RpcError`].
//!
//! Commands are independent of each other, so each one runs in its own task. The
//! controller keeps track of them and waits for every in-flight command before it stops.
//!
//! The controller stops when its shutdown token is cancelled or when every client is
//! dropped. Commands already queued at that point are still answered; later sends fail
//! with `UNAVAILABLE`.

use super::dto::{ChangeOrderStatusDto, CreateOrderDto, FindOneOrderDto, OrderPaginationDto};
use super::RpcError;
use crate::clients::OrderClient;
use crate::model::OrderView;
use crate::service::{OrderPage, OrderService};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub type Reply<T> = oneshot::Sender<Result<T, RpcError>>;

/// Messages understood by the [`OrderController`].
#[derive(Debug)]
pub enum OrderCommand {
    Create {
        dto: CreateOrderDto,
        respond_to: Reply<OrderView>,
    },
    FindAll {
        dto: OrderPaginationDto,
        respond_to: Reply<OrderPage>,
    },
    FindOne {
        dto: FindOneOrderDto,
        respond_to: Reply<OrderView>,
    },
    ChangeStatus {
        dto: ChangeOrderStatusDto,
        respond_to: Reply<OrderView>,
    },
}

impl OrderCommand {
    pub fn name(&self) -> &'static str {
        match self {
            OrderCommand::Create { .. } => super::CREATE_ORDER,
            OrderCommand::FindAll { .. } => super::FIND_ALL_ORDERS,
            OrderCommand::FindOne { .. } => super::FIND_ONE_ORDER,
            OrderCommand::ChangeStatus { .. } => super::CHANGE_ORDER_STATUS,
        }
    }
}

pub struct OrderController {
    receiver: mpsc::Receiver<OrderCommand>,
    service: OrderService,
}

impl OrderController {
    /// Creates the controller and the client that talks to it.
    pub fn new(service: OrderService, buffer_size: usize) -> (Self, OrderClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, service }, OrderClient::new(sender))
    }

    /// Serves commands until `shutdown` is cancelled or every client is dropped, then
    /// drains queued and in-flight commands.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!("Order controller started");
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Order controller received shutdown signal");
                    break;
                }
                command = self.receiver.recv() => match command {
                    Some(command) => {
                        debug!(command = command.name(), "Received");
                        in_flight.spawn(handle(self.service.clone(), command));
                    }
                    None => break,
                },
                Some(finished) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = finished {
                        error!(error = %e, "Command task failed");
                    }
                }
            }
        }

        self.receiver.close();
        while let Some(command) = self.receiver.recv().await {
            debug!(command = command.name(), "Received while stopping");
            in_flight.spawn(handle(self.service.clone(), command));
        }
        while let Some(finished) = in_flight.join_next().await {
            if let Err(e) = finished {
                error!(error = %e, "Command task failed");
            }
        }
        info!("Order controller stopped");
    }
}

fn reply<T>(command: &'static str, respond_to: Reply<T>, result: Result<T, RpcError>) {
    if let Err(e) = &result {
        warn!(command, status = %e.status, message = %e.message, "Command failed");
    }
    if respond_to.send(result).is_err() {
        debug!(command, "Caller went away before the reply");
    }
}

async fn handle(service: OrderService, command: OrderCommand) {
    let name = command.name();
    match command {
        OrderCommand::Create { dto, respond_to } => {
            reply(name, respond_to, create_order(&service, dto).await)
        }
        OrderCommand::FindAll { dto, respond_to } => {
            reply(name, respond_to, find_all_orders(&service, dto).await)
        }
        OrderCommand::FindOne { dto, respond_to } => {
            reply(name, respond_to, find_one_order(&service, dto).await)
        }
        OrderCommand::ChangeStatus { dto, respond_to } => {
            reply(name, respond_to, change_order_status(&service, dto).await)
        }
    }
}

async fn create_order(service: &OrderService, dto: CreateOrderDto) -> Result<OrderView, RpcError> {
    let items = dto.validate()?;
    Ok(service.create(items).await?)
}

async fn find_all_orders(
    service: &OrderService,
    dto: OrderPaginationDto,
) -> Result<OrderPage, RpcError> {
    let query = dto.validate()?;
    Ok(service.find_all(query).await?)
}

async fn find_one_order(service: &OrderService, dto: FindOneOrderDto) -> Result<OrderView, RpcError> {
    let id = dto.validate()?;
    Ok(service.find_one(id).await?)
}

async fn change_order_status(
    service: &OrderService,
    dto: ChangeOrderStatusDto,
) -> Result<OrderView, RpcError> {
    let (id, status) = dto.validate()?;
    Ok(service.change_status(id, status).await?)
}
