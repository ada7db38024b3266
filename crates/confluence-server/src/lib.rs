//! HTTP lookup surface over the resolution-and-navigation core

pub mod handlers;
pub mod router;

use std::sync::Arc;
use std::time::Duration;

use confluence_core::{DataSourceRegistry, NetworkStore};

/// Per-deployment navigation policy.
#[derive(Debug, Clone)]
pub struct NavigationLimits {
    /// Hard cap on traversal distance. `None` means unbounded.
    pub max_distance_km: Option<f64>,
    /// Deadline for a navigation request; an elapsed deadline abandons the
    /// traversal and surfaces a timeout, never a partial result.
    pub request_timeout: Duration,
}

impl Default for NavigationLimits {
    fn default() -> Self {
        NavigationLimits {
            max_distance_km: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Process-wide immutable state, built once at startup and shared across
/// requests. Per-request work never mutates it.
pub struct AppState {
    pub registry: DataSourceRegistry,
    pub store: Arc<dyn NetworkStore>,
    pub limits: NavigationLimits,
}

impl AppState {
    pub fn new(
        registry: DataSourceRegistry,
        store: Arc<dyn NetworkStore>,
        limits: NavigationLimits,
    ) -> Self {
        AppState {
            registry,
            store,
            limits,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// The lookup server: owns the shared state and the listen loop.
pub struct LookupServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl LookupServer {
    pub fn new(state: AppState, config: ServerConfig) -> Self {
        LookupServer {
            state: Arc::new(state),
            config,
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("Listening on http://{}", listener.local_addr()?);

        let app = router::create_router(self.state);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
