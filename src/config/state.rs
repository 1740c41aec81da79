// Application state module
// Read-only configuration shared by every connection, plus the request slots that bound concurrency

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// One permit per connection being served; the accept loop waits when none are left
    pub permits: Arc<Semaphore>,
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let slots = config.max_concurrency();
        Self {
            config,
            permits: Arc::new(Semaphore::new(slots)),
            active_connections: AtomicUsize::new(0),
        }
    }
}
