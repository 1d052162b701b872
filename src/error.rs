// Error types for batching, configuration and the external collaborators

use std::io;
use thiserror::Error;

/// Failure to load or validate a [`BatchingConfig`](crate::config::BatchingConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure reported by a [`Geocoder`](crate::utils::geocoder::Geocoder)
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("address is empty")]
    EmptyAddress,

    #[error("unknown address `{0}`")]
    UnknownAddress(String),

    #[error("failed to read address table: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse address table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure reported by an [`OrderStore`](crate::services::order_store::OrderStore)
#[derive(Debug, Error)]
pub enum OrderStoreError {
    #[error("failed to read orders: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse orders: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("order store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the batching engine and the catalog service
#[derive(Debug, Error)]
pub enum BatchingError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("no orders found for batch `{batch_id}`")]
    NotFound { batch_id: String },

    /// Route construction broke its own bookkeeping. This is a defect, never
    /// an expected outcome.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Geocoding(#[from] GeocodeError),

    #[error(transparent)]
    OrderStore(#[from] OrderStoreError),
}
