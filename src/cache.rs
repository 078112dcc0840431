use crate::transport::ApiResponse;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl From<&ApiResponse> for CachedResponse {
    fn from(response: &ApiResponse) -> Self {
        Self {
            status: response.status,
            body: response.body.clone(),
        }
    }
}

impl From<CachedResponse> for ApiResponse {
    fn from(cached: CachedResponse) -> Self {
        Self {
            status: cached.status,
            body: cached.body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheData {
    pub entries: BTreeMap<String, CachedResponse>,
}

/// Shared request-keyed store of the latest successful response bodies.
#[derive(Clone, Default)]
pub struct ResponseCache {
    data: Arc<Mutex<CacheData>>,
}

impl ResponseCache {
    pub fn new(data: CacheData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub async fn lookup(&self, key: &str) -> Option<CachedResponse> {
        self.data.lock().await.entries.get(key).cloned()
    }

    pub async fn store(&self, key: String, response: CachedResponse) {
        self.data.lock().await.entries.insert(key, response);
    }

    pub async fn len(&self) -> usize {
        self.data.lock().await.entries.len()
    }

    pub async fn snapshot(&self) -> CacheData {
        self.data.lock().await.clone()
    }
}
