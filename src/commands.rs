//! CLI command implementations

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use confluence_core::{DataSourceRegistry, InMemoryNetwork, NetworkFile, NetworkStore};
use confluence_server::{AppState, LookupServer, NavigationLimits, ServerConfig};

pub async fn serve(
    network: PathBuf,
    host: String,
    port: u16,
    max_distance_km: Option<f64>,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let (registry, store) = load_network(&network)?;
    tracing::info!(
        "Loaded {} catchments, {} flowlines, {} sources from {}",
        store.catchment_count(),
        store.flowline_count(),
        registry.len(),
        network.display()
    );

    let limits = NavigationLimits {
        max_distance_km,
        request_timeout: Duration::from_secs(timeout_secs),
    };
    let state = AppState::new(registry, Arc::new(store), limits);
    let server = LookupServer::new(state, ServerConfig { host, port });
    server.start().await
}

pub fn sources(network: PathBuf) -> anyhow::Result<()> {
    let (registry, _store) = load_network(&network)?;
    for source in registry.list() {
        println!("{}\t{}", source.id, source.name);
    }
    Ok(())
}

pub fn check(network: PathBuf) -> anyhow::Result<()> {
    let (registry, store) = load_network(&network)?;
    tracing::info!(
        "Network ok: {} catchments, {} flowlines, {} sources",
        store.catchment_count(),
        store.flowline_count(),
        registry.len()
    );
    Ok(())
}

/// Load the network file, build the registry and the in-memory store, and
/// run the startup consistency guard. Any failure here is fatal.
fn load_network(path: &PathBuf) -> anyhow::Result<(DataSourceRegistry, InMemoryNetwork)> {
    let file = NetworkFile::load(path)
        .with_context(|| format!("loading network file {}", path.display()))?;
    let registry = DataSourceRegistry::new(file.sources.clone()).context("building registry")?;
    let store = InMemoryNetwork::from_network_file(&file)
        .with_context(|| format!("building network from {}", path.display()))?;
    store.verify_acyclic().context("verifying flow graph")?;
    Ok((registry, store))
}
