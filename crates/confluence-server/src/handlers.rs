//! REST API handlers and the core-error → HTTP mapping

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use confluence_core::{
    geojson, navigate, resolve, resolve_feature_type, Error, FeatureIdentifier, NavigationMode,
};

use crate::AppState;

/// JSON error body; every failure response carries one.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Core error wrapped for the HTTP surface.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::UnknownSource(_) | Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::NotImplemented | Error::UnknownNavigationMode(_) => StatusCode::BAD_REQUEST,
            Error::InconsistentNetwork(detail) => {
                tracing::error!(%detail, "inconsistent network data");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        };
        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

/// Wrap a GeoJSON value with its content type.
fn geojson_response(value: serde_json::Value) -> Response {
    (
        [(header::CONTENT_TYPE, geojson::MIME_TYPE_GEOJSON)],
        Json(value),
    )
        .into_response()
}

/// `GET /api` — the registered data sources.
pub async fn list_sources(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.registry.list().to_vec())
}

/// `GET /api/{source}` — feature-by-type listing, unsupported.
pub async fn list_features(Path(source): Path<String>) -> Result<Response, ApiError> {
    // Always fails with NotImplemented today; the Ok arm is the would-be
    // listing shape.
    resolve_feature_type(&source)?;
    Ok(Json(serde_json::Value::Array(Vec::new())).into_response())
}

/// `GET /api/{source}/{identifier}` — resolve to a GeoJSON feature.
pub async fn get_feature(
    State(state): State<Arc<AppState>>,
    Path((source, identifier)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let request = FeatureIdentifier { source, identifier };
    let resolved = resolve(&state.registry, state.store.as_ref(), &request)?;
    Ok(geojson_response(geojson::feature(&resolved)))
}

/// `GET /api/{source}/{identifier}/navigate` — the available modes.
pub async fn navigation_options(
    State(state): State<Arc<AppState>>,
    Path((source, identifier)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let request = FeatureIdentifier { source, identifier };
    resolve(&state.registry, state.store.as_ref(), &request)?;
    Ok(Json(geojson::navigation_options(&request.source, &request.identifier)).into_response())
}

/// `GET /api/{source}/{identifier}/navigate/{mode}` — run the traversal.
pub async fn navigate_network(
    State(state): State<Arc<AppState>>,
    Path((source, identifier, mode)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    let mode: NavigationMode = mode.parse()?;
    let timeout = state.limits.request_timeout;
    let max_distance_km = state.limits.max_distance_km;

    let request = FeatureIdentifier { source, identifier };
    let task = tokio::task::spawn_blocking(move || {
        let resolved = resolve(&state.registry, state.store.as_ref(), &request)?;
        navigate(
            state.store.as_ref(),
            resolved.catchment.comid,
            mode,
            max_distance_km,
        )
    });

    let catchments = match tokio::time::timeout(timeout, task).await {
        Err(_elapsed) => return Err(Error::DeadlineExceeded.into()),
        Ok(Err(join_err)) => return Err(ApiError::internal(join_err.to_string())),
        Ok(Ok(result)) => result?,
    };

    Ok(geojson_response(geojson::feature_collection(&catchments)))
}
