//! Wraps the generated `OrdersManagerService` and `TnxConfirmingService`
//! clients behind the two calls the coordinator needs.

use std::time::SystemTime;

use tonic::transport::Channel;
use tonic::Status;

use super::pb::orders::tnx_confirming_service_client::TnxConfirmingServiceClient;
use super::pb::orders::orders_manager_service_client::OrdersManagerServiceClient;
use super::pb::orders::{Confirmation, InsertedOrder, Order};

#[derive(Clone)]
pub struct OrderService {
    orders: OrdersManagerServiceClient<Channel>,
    tx: TnxConfirmingServiceClient<Channel>,
}

impl OrderService {
    pub fn new(channel: Channel) -> Self {
        Self { orders: OrdersManagerServiceClient::new(channel.clone()), tx: TnxConfirmingServiceClient::new(channel) }
    }

    pub async fn insert_order(&self, user_id: String, label: String) -> Result<InsertedOrder, Status> {
        let mut client = self.orders.clone();
        let created_at = humantime::format_rfc3339(SystemTime::now()).to_string();
        let resp = client.insert_order(Order { user_id, label, created_at }).await?;
        Ok(resp.into_inner())
    }

    pub async fn send_confirmation(&self, tnx: String, commit: bool) -> Result<(), Status> {
        let mut client = self.tx.clone();
        client.send_confirmation(Confirmation { tnx, commit }).await?;
        Ok(())
    }
}
