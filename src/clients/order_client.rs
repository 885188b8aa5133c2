//! # Order Client
//!
//! Caller-side handle of the [`OrderController`](crate::rpc::OrderController). Typed
//! methods for in-process callers, and [`OrderClient::dispatch`] for transports that carry
//! a command name and a JSON payload.

use crate::model::OrderView;
use crate::rpc::{
    ChangeOrderStatusDto, CreateOrderDto, FindOneOrderDto, OrderCommand, OrderPaginationDto,
    Reply, RpcError, CHANGE_ORDER_STATUS, CREATE_ORDER, FIND_ALL_ORDERS, FIND_ONE_ORDER,
};
use crate::service::OrderPage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct OrderClient {
    sender: mpsc::Sender<OrderCommand>,
}

impl OrderClient {
    pub fn new(sender: mpsc::Sender<OrderCommand>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> OrderCommand,
    ) -> Result<T, RpcError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(command(respond_to))
            .await
            .map_err(|_| RpcError::unavailable("order controller is not running"))?;
        response
            .await
            .map_err(|_| RpcError::unavailable("order controller dropped the request"))?
    }

    #[instrument(skip(self, dto), fields(items = dto.items.len()))]
    pub async fn create_order(&self, dto: CreateOrderDto) -> Result<OrderView, RpcError> {
        debug!("Sending request");
        self.request(|respond_to| OrderCommand::Create { dto, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_all_orders(&self, dto: OrderPaginationDto) -> Result<OrderPage, RpcError> {
        debug!("Sending request");
        self.request(|respond_to| OrderCommand::FindAll { dto, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_one_order(&self, dto: FindOneOrderDto) -> Result<OrderView, RpcError> {
        debug!("Sending request");
        self.request(|respond_to| OrderCommand::FindOne { dto, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn change_order_status(
        &self,
        dto: ChangeOrderStatusDto,
    ) -> Result<OrderView, RpcError> {
        debug!("Sending request");
        self.request(|respond_to| OrderCommand::ChangeStatus { dto, respond_to })
            .await
    }

    /// Routes a named command with a JSON payload. Unknown commands and payloads that don't
    /// fit the command are rejected as `BAD_REQUEST`.
    #[instrument(skip(self, payload))]
    pub async fn dispatch(&self, command: &str, payload: Value) -> Result<Value, RpcError> {
        match command {
            CREATE_ORDER => to_json(self.create_order(from_json(payload)?).await?),
            FIND_ALL_ORDERS => to_json(self.find_all_orders(from_json(payload)?).await?),
            FIND_ONE_ORDER => to_json(self.find_one_order(from_json(payload)?).await?),
            CHANGE_ORDER_STATUS => to_json(self.change_order_status(from_json(payload)?).await?),
            other => Err(RpcError::bad_request(format!("Unknown command: {other}"))),
        }
    }
}

fn from_json<T: DeserializeOwned>(payload: Value) -> Result<T, RpcError> {
    serde_json::from_value(payload)
        .map_err(|e| RpcError::bad_request(format!("Malformed payload: {e}")))
}

fn to_json<T: Serialize>(reply: T) -> Result<Value, RpcError> {
    serde_json::to_value(reply)
        .map_err(|e| RpcError::internal(format!("Failed to encode reply: {e}")))
}
