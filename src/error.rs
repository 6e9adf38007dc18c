use thiserror::Error;

/// Errors from the response cache client. Distinguishes "not found" from
/// transport failures so callers can tell a cold cache from a broken one.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("key not found")]
    NotFound,
    #[error("cache transport error: {0}")]
    Transport(#[from] redis::RedisError),
    #[error("response serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors raised by the two-phase `SendMessage` coordinator. Each variant
/// names the stage that failed and carries the message written back to the
/// client.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("Error while decoding user from request")]
    Decode,
    #[error("Error while creating user")]
    CreateUser(#[source] tonic::Status),
    #[error("Error while creating order. User rollback success")]
    InsertOrderRolledBack(#[source] tonic::Status),
    #[error("Error while rollback user")]
    RollbackFailed(#[source] tonic::Status),
    #[error("Error while commit user")]
    CommitUserFailed(#[source] tonic::Status),
    #[error("Error while rollback order. User commit success")]
    OrderCompensationFailed(#[source] tonic::Status),
    #[error("Error while commit order. User commit success")]
    OrderCommitFailed(#[source] tonic::Status),
}
