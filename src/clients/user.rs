//! Wraps the generated `Users` and `DistributedTxService` clients behind the
//! three calls the coordinator needs.

use tonic::transport::Channel;
use tonic::Status;

use super::pb::users::distributed_tx_service_client::DistributedTxServiceClient;
use super::pb::users::users_client::UsersClient;
use super::pb::users::{CreatedUser, NewUser, TxToCommit, TxToRollback};

#[derive(Clone)]
pub struct UserService {
    users: UsersClient<Channel>,
    tx: DistributedTxServiceClient<Channel>,
}

impl UserService {
    pub fn new(channel: Channel) -> Self {
        Self { users: UsersClient::new(channel.clone()), tx: DistributedTxServiceClient::new(channel) }
    }

    pub async fn create_user(&self, name: String) -> Result<CreatedUser, Status> {
        let mut client = self.users.clone();
        let resp = client.create_user(NewUser { name }).await?;
        Ok(resp.into_inner())
    }

    pub async fn commit(&self, tx_id: String) -> Result<(), Status> {
        let mut client = self.tx.clone();
        client.commit(TxToCommit { tx_id }).await?;
        Ok(())
    }

    pub async fn rollback(&self, tx_id: String) -> Result<(), Status> {
        let mut client = self.tx.clone();
        client.rollback(TxToRollback { tx_id }).await?;
        Ok(())
    }
}
