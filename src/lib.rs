pub mod app;
pub mod assistant;
pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod offline;
pub mod state;
pub mod storage;
pub mod transport;
pub mod ui;

pub use cache::ResponseCache;
pub use client::SyncClient;
pub use config::ClientConfig;
pub use errors::{ClientError, ErrorKind};
pub use offline::{OfflineWorker, WorkerState};
pub use storage::CacheFile;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
