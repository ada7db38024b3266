//! Data source registry: the fixed set of external identifier namespaces.

use std::collections::HashMap;

use thiserror::Error;

use crate::model::DataSource;

/// Construction failure. Fatal at startup, never a per-request error.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate data source token: {0}")]
    DuplicateSource(String),
    #[error("registry requires at least one data source")]
    Empty,
}

/// Immutable set of data sources, built once at startup and read
/// concurrently afterwards. Listing preserves registration order.
#[derive(Debug, Clone)]
pub struct DataSourceRegistry {
    sources: Vec<DataSource>,
    by_token: HashMap<String, usize>,
}

impl DataSourceRegistry {
    pub fn new(sources: Vec<DataSource>) -> Result<Self, RegistryError> {
        if sources.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut by_token = HashMap::with_capacity(sources.len());
        for (idx, source) in sources.iter().enumerate() {
            if by_token.insert(source.id.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateSource(source.id.clone()));
            }
        }
        Ok(DataSourceRegistry { sources, by_token })
    }

    /// All registered sources, in registration order.
    pub fn list(&self) -> &[DataSource] {
        &self.sources
    }

    pub fn lookup(&self, token: &str) -> Option<&DataSource> {
        self.by_token.get(token).map(|&idx| &self.sources[idx])
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
