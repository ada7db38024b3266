//! Typed failure taxonomy shared by the resolver and navigator.
//!
//! Every failure that crosses the core boundary is one of these kinds; the
//! HTTP layer maps them onto status codes without inspecting messages.

use thiserror::Error;

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The source token is not in the registry and is not the comid namespace.
    #[error("data source \"{0}\" is not recognized")]
    UnknownSource(String),

    /// A recognized capability this deployment does not support
    /// (feature-by-type listing). The message is part of the contract.
    #[error("This functionality is not implemented.")]
    NotImplemented,

    /// Valid source, but no catchment matches the identifier.
    #[error("no feature found for {source}/{identifier}")]
    NotFound { r#source: String, identifier: String },

    #[error("navigation mode \"{0}\" is not recognized")]
    UnknownNavigationMode(String),

    /// Fatal data-integrity fault in the flow graph (cycle, dangling edge,
    /// duplicate main downstream edge). Not retryable.
    #[error("inconsistent network data: {0}")]
    InconsistentNetwork(String),

    /// Transient store-level fault. Retry policy belongs to the caller.
    #[error("network store unavailable: {0}")]
    StoreUnavailable(String),

    /// The caller's deadline elapsed mid-traversal; no partial result.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}
