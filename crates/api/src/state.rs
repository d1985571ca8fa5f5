use std::sync::{Arc, RwLock};

use crate::config::ServerConfig;
use crate::registry::StatusRegistry;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The
/// registry lock is held only for the duration of a read or an
/// insert, never across an await point.
#[derive(Clone)]
pub struct AppState {
    /// Per-appliance monitor/idle registry.
    pub registry: Arc<RwLock<StatusRegistry>>,
    /// Server configuration (CORS origins, user profiles).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            registry: Arc::new(RwLock::new(StatusRegistry::new())),
            config: Arc::new(config),
        }
    }
}
