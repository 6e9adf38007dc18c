//! Redis-backed cache client. Entries never expire; callers that want
//! cleanup call `delete` themselves, as the retrieval endpoint does on every
//! read.

use redis::AsyncCommands;
use tracing::instrument;

use super::{CacheClient, CapturedResponse};
use crate::error::CacheError;

/// Thin wrapper around an async Redis connection manager. Cloning is cheap:
/// `ConnectionManager` is itself an `Arc`-backed handle that reconnects
/// transparently.
#[derive(Clone)]
pub struct Cache {
    conn: redis::aio::ConnectionManager,
}

impl Cache {
    pub async fn connect(addr: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(format!("redis://{addr}"))?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }
}

impl CacheClient for Cache {
    #[instrument(skip(self, response))]
    async fn set(&self, key: &str, response: &CapturedResponse) -> Result<(), CacheError> {
        let payload = serde_json::to_vec(response)?;
        let mut conn = self.conn.clone();
        conn.set(key, payload).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<CapturedResponse, CacheError> {
        let mut conn = self.conn.clone();
        let payload: Option<Vec<u8>> = conn.get(key).await?;
        let payload = payload.ok_or(CacheError::NotFound)?;
        let response = serde_json::from_slice(&payload)?;
        Ok(response)
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
