pub mod admin;
pub mod config;
pub mod rest;
pub mod storage;
pub mod tasks;

use std::sync::Arc;

use config::ServerConfig;
use storage::Storage;
use tasks::store::TaskStore;

/// Shared application state passed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub storage: Arc<Storage>,
    /// Task persistence over a clone of the storage pool.
    pub tasks: TaskStore,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: Arc<ServerConfig>, storage: Arc<Storage>) -> Self {
        let tasks = TaskStore::new(storage.pool());
        Self {
            config,
            storage,
            tasks,
            started_at: std::time::Instant::now(),
        }
    }
}
