//! An in-memory stand-in for [`Cache`](super::Cache), used by tests in place
//! of live Redis.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{CacheClient, CapturedResponse};
use crate::error::CacheError;

#[derive(Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<Mutex<HashMap<String, CapturedResponse>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: &str, response: CapturedResponse) {
        self.entries.lock().unwrap().insert(key.to_owned(), response);
    }
}

impl CacheClient for InMemoryCache {
    async fn set(&self, key: &str, response: &CapturedResponse) -> Result<(), CacheError> {
        self.entries.lock().unwrap().insert(key.to_owned(), response.clone());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<CapturedResponse, CacheError> {
        self.entries.lock().unwrap().get(key).cloned().ok_or(CacheError::NotFound)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
