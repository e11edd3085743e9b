//! Application state for crab-merchant

use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::crud::{CrudService, Resource};
use crate::db::memory::MemoryGateway;
use crate::db::postgres::PgGateway;
use crate::db::{Gateway, RepoResult, Row};
use crate::resources::reference::MERCHANTS;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (PostgreSQL, or in-memory in development)
    pub gateway: Arc<dyn Gateway>,
    /// JWT secret for caller authentication
    pub jwt_secret: String,
}

impl AppState {
    /// Connect the configured backend
    pub async fn new(config: &Config) -> RepoResult<Self> {
        let gateway: Arc<dyn Gateway> = match &config.database_url {
            Some(url) => Arc::new(PgGateway::connect(url, config.database_max_connections).await?),
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory gateway (data is not persisted)");
                let memory = MemoryGateway::new();
                if config.seed_demo_merchant && config.is_development() {
                    let id = seed_merchant(&memory, "Demo merchant");
                    tracing::info!(merchant_id = id, "Seeded demo merchant");
                }
                Arc::new(memory)
            }
        };
        Ok(Self::with_gateway(gateway, config.jwt_secret.clone()))
    }

    pub fn with_gateway(gateway: Arc<dyn Gateway>, jwt_secret: impl Into<String>) -> Self {
        Self {
            gateway,
            jwt_secret: jwt_secret.into(),
        }
    }

    /// CRUD service for one resource over the shared gateway
    pub fn service<R: Resource>(&self) -> CrudService<R> {
        CrudService::new(self.gateway.clone())
    }
}

/// Insert an active merchant row into an in-memory gateway
pub fn seed_merchant(memory: &MemoryGateway, name: &str) -> i64 {
    let mut row = Row::new();
    row.insert("name".into(), Value::from(name));
    memory.seed(&MERCHANTS, row)
}
