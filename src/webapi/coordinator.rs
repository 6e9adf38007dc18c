//! The two-phase `SendMessage` coordinator: create the user, insert the
//! order, then commit both with compensating actions on partial failure.

use serde::Deserialize;

use crate::clients::order::OrderService;
use crate::clients::user::UserService;
use crate::error::CoordinatorError;

use super::response;
use super::sink::Sink;
use super::{Handler, HandlerFuture, OwnedRequest};

#[derive(Debug, Deserialize)]
struct Message {
    name: String,
    label: String,
}

pub struct Coordinator {
    user: UserService,
    order: OrderService,
}

impl Coordinator {
    pub fn new(user: UserService, order: OrderService) -> Self {
        Self { user, order }
    }
}

impl Handler for Coordinator {
    fn call(&self, req: OwnedRequest, mut sink: Sink) -> HandlerFuture {
        let user = self.user.clone();
        let order = self.order.clone();
        Box::pin(async move {
            match send_message(&user, &order, &req.body).await {
                Ok(()) => response::status_ok(&mut sink, "User and order created"),
                Err(err) => {
                    tracing::error!(error = %err, "SendMessage failed");
                    match err {
                        CoordinatorError::Decode => response::bad_request(&mut sink, &err.to_string()),
                        _ => response::internal_error(&mut sink, &err.to_string()),
                    }
                }
            }
            sink
        })
    }
}

async fn send_message(user: &UserService, order: &OrderService, body: &[u8]) -> Result<(), CoordinatorError> {
    let message: Message = serde_json::from_slice(body).map_err(|_| CoordinatorError::Decode)?;

    let created_user = user.create_user(message.name).await.map_err(CoordinatorError::CreateUser)?;
    let user_tx = created_user.tx_id;

    let inserted_order = match order.insert_order(created_user.id, message.label).await {
        Ok(inserted) => inserted,
        Err(insert_err) => {
            tracing::error!(error = %insert_err, "Error while creating order");
            user.rollback(user_tx).await.map_err(CoordinatorError::RollbackFailed)?;
            return Err(CoordinatorError::InsertOrderRolledBack(insert_err));
        }
    };
    let order_tx = inserted_order.tnx;

    if let Err(commit_err) = user.commit(user_tx).await {
        order
            .send_confirmation(order_tx, false)
            .await
            .map_err(CoordinatorError::OrderCompensationFailed)?;
        return Err(CoordinatorError::CommitUserFailed(commit_err));
    }

    order
        .send_confirmation(order_tx, true)
        .await
        .map_err(CoordinatorError::OrderCommitFailed)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_decodes_from_json() {
        let msg: Message = serde_json::from_str(r#"{"name":"John","label":"Bag"}"#).unwrap();
        assert_eq!(msg.name, "John");
        assert_eq!(msg.label, "Bag");
    }
}
