//! Axum router setup for the lookup server

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{get_feature, list_features, list_sources, navigate_network, navigation_options},
    AppState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api", get(list_sources))
        .route("/api/:source", get(list_features))
        .route("/api/:source/:identifier", get(get_feature))
        .route("/api/:source/:identifier/navigate", get(navigation_options))
        .route(
            "/api/:source/:identifier/navigate/:mode",
            get(navigate_network),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
