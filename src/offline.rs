//! Network-first request interception with a cache fallback.
//!
//! [`OfflineWorker`] wraps another [`Transport`] and follows the service
//! worker lifecycle: it is created `Installing`, skips the waiting phase,
//! claims every open client on activation and intercepts until terminated.
//! While active, every request goes to the network first; only when the
//! network produced no response at all is the cached body for the exact
//! same request served instead. The worker reads the cache but never
//! writes it.

use crate::cache::ResponseCache;
use crate::errors::ClientError;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Installing,
    Active,
    Terminated,
}

#[derive(Debug)]
struct Lifecycle {
    state: WorkerState,
    skip_waiting: bool,
    clients_claimed: bool,
}

pub struct OfflineWorker<T> {
    network: T,
    cache: ResponseCache,
    lifecycle: Mutex<Lifecycle>,
}

impl<T: Transport> OfflineWorker<T> {
    pub fn new(network: T, cache: ResponseCache) -> Self {
        Self {
            network,
            cache,
            lifecycle: Mutex::new(Lifecycle {
                state: WorkerState::Installing,
                skip_waiting: false,
                clients_claimed: false,
            }),
        }
    }

    /// Handles the install event. Waiting is skipped, so activation follows
    /// immediately instead of after older instances finish.
    pub async fn install(&self) -> WorkerState {
        {
            let mut lifecycle = self.lifecycle.lock().await;
            if lifecycle.state != WorkerState::Installing {
                return lifecycle.state;
            }
            lifecycle.skip_waiting = true;
        }
        self.activate().await
    }

    /// Handles the activate event: claims all open clients so interception
    /// starts without a reload.
    pub async fn activate(&self) -> WorkerState {
        let mut lifecycle = self.lifecycle.lock().await;
        if lifecycle.state == WorkerState::Installing {
            lifecycle.state = WorkerState::Active;
            lifecycle.clients_claimed = true;
            info!(skip_waiting = lifecycle.skip_waiting, "offline worker active");
        }
        lifecycle.state
    }

    pub async fn terminate(&self) {
        let mut lifecycle = self.lifecycle.lock().await;
        lifecycle.state = WorkerState::Terminated;
        lifecycle.clients_claimed = false;
    }

    pub async fn state(&self) -> WorkerState {
        self.lifecycle.lock().await.state
    }

    pub async fn controls_clients(&self) -> bool {
        let lifecycle = self.lifecycle.lock().await;
        lifecycle.state == WorkerState::Active && lifecycle.clients_claimed
    }

    pub fn network(&self) -> &T {
        &self.network
    }

    async fn intercept(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let key = request.cache_key();
        match self.network.send(request).await {
            Ok(response) => Ok(response),
            Err(err) if err.is_transport() => match self.cache.lookup(&key).await {
                Some(cached) => {
                    warn!(%key, "network unavailable, serving cached response");
                    Ok(cached.into())
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }
}

impl<T: Transport> Transport for OfflineWorker<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        if self.controls_clients().await {
            self.intercept(request).await
        } else {
            self.network.send(request).await
        }
    }
}
