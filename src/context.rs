use crate::config::AppConfig;
use std::sync::Arc;

/// Shared, read-only state handed to the orchestrator.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
