//! Identifier resolution: (source token, identifier) → canonical catchment.

use crate::error::{Error, Result};
use crate::model::{Catchment, FeatureIdentifier};
use crate::registry::DataSourceRegistry;
use crate::store::NetworkStore;

/// Reserved namespace for direct comid lookup. Not listed in the registry;
/// identifiers are the comids themselves.
pub const COMID_NAMESPACE: &str = "comid";

/// A catchment together with the identifier that resolved to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFeature {
    pub catchment: Catchment,
    /// Source token the request used.
    pub source: String,
    /// Display name of the source.
    pub source_name: String,
    /// The external identifier as supplied.
    pub identifier: String,
}

/// Resolve an external identifier to its canonical catchment.
///
/// Read-only and idempotent: repeated calls with the same arguments return
/// the same catchment for the lifetime of the store contents.
pub fn resolve(
    registry: &DataSourceRegistry,
    store: &dyn NetworkStore,
    request: &FeatureIdentifier,
) -> Result<ResolvedFeature> {
    let (source_token, identifier) = (request.source.as_str(), request.identifier.as_str());
    if source_token == COMID_NAMESPACE {
        return resolve_comid(store, identifier);
    }

    let source = registry
        .lookup(source_token)
        .ok_or_else(|| Error::UnknownSource(source_token.to_string()))?;

    let comid = store
        .find_by_identifier(&source.id, identifier)?
        .ok_or_else(|| Error::NotFound {
            source: source_token.to_string(),
            identifier: identifier.to_string(),
        })?;

    let catchment = store.catchment(comid)?.ok_or_else(|| {
        Error::InconsistentNetwork(format!(
            "crosswalk for {source_token}/{identifier} points at missing catchment {comid}"
        ))
    })?;

    tracing::debug!(%source_token, %identifier, comid = %catchment.comid, "resolved feature");
    Ok(ResolvedFeature {
        catchment,
        source: source.id.clone(),
        source_name: source.name.clone(),
        identifier: identifier.to_string(),
    })
}

/// Feature-by-type listing (a source token with no identifier) is a
/// recognized capability this deployment does not support.
pub fn resolve_feature_type(_source_token: &str) -> Result<()> {
    Err(Error::NotImplemented)
}

fn resolve_comid(store: &dyn NetworkStore, identifier: &str) -> Result<ResolvedFeature> {
    let not_found = || Error::NotFound {
        source: COMID_NAMESPACE.to_string(),
        identifier: identifier.to_string(),
    };
    // A non-numeric identifier cannot match any catchment.
    let comid = identifier
        .parse::<i64>()
        .map(crate::model::Comid)
        .map_err(|_| not_found())?;
    let catchment = store.catchment(comid)?.ok_or_else(not_found)?;
    Ok(ResolvedFeature {
        catchment,
        source: COMID_NAMESPACE.to_string(),
        source_name: "NHDPlus comid".to_string(),
        identifier: identifier.to_string(),
    })
}
