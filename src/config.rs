// Tunable parameters of the batching engine

use crate::error::ConfigError;
use crate::models::{Kilometers, Minutes};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of orders a partner carries in one trip
pub const DEFAULT_MAX_BATCH_SIZE: usize = 3;

/// Default maximum distance between two delivery points of a cross-restaurant batch
pub const DEFAULT_MAX_DISTANCE_KM: Kilometers = 5.0;

/// Default maximum gap between creation times of a cross-restaurant batch
pub const DEFAULT_MAX_TIME_WINDOW_MINUTES: Minutes = 30.0;

/// Default share of an order's total price paid to the partner
pub const DEFAULT_COMMISSION_RATE: f64 = 0.15;

/// Default travel time per kilometer, i.e. an average speed of 30 km/h
pub const DEFAULT_SPEED_FACTOR_MIN_PER_KM: f64 = 2.0;

/// Parameters of batch formation, routing and earnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchingConfig {
    /// Upper bound on the number of orders in one batch
    pub max_batch_size: usize,

    /// Delivery points of cross-restaurant orders may be at most this far apart
    pub max_distance_km: Kilometers,

    /// Cross-restaurant orders may be created at most this many minutes apart
    pub max_time_window_minutes: Minutes,

    /// Share of each order's total price the partner earns
    pub commission_rate: f64,

    /// Minutes needed to travel one kilometer
    pub speed_factor_min_per_km: f64,

    /// Emit cross-restaurant batches that found no compatible partner order.
    /// Off by default: such orders are left out of the catalog.
    pub emit_singleton_cross_restaurant: bool,
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            max_time_window_minutes: DEFAULT_MAX_TIME_WINDOW_MINUTES,
            commission_rate: DEFAULT_COMMISSION_RATE,
            speed_factor_min_per_km: DEFAULT_SPEED_FACTOR_MIN_PER_KM,
            emit_singleton_cross_restaurant: false,
        }
    }
}

impl BatchingConfig {
    /// Loads a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json_str = fs::read_to_string(path)?;
        Self::from_json_str(&json_str)
    }

    /// Parses and validates a configuration from a JSON string
    pub fn from_json_str(json_str: &str) -> Result<Self, ConfigError> {
        let config: BatchingConfig = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with a different batch size limit
    pub fn with_max_batch_size(&self, max_batch_size: usize) -> Result<Self, ConfigError> {
        let config = Self {
            max_batch_size,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that every parameter is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_batch_size == 0 {
            return Err(ConfigError::invalid("max_batch_size", "must be at least 1"));
        }
        if !self.max_distance_km.is_finite() || self.max_distance_km < 0.0 {
            return Err(ConfigError::invalid(
                "max_distance_km",
                format!("must be a non-negative number, got {}", self.max_distance_km),
            ));
        }
        if !self.max_time_window_minutes.is_finite() || self.max_time_window_minutes < 0.0 {
            return Err(ConfigError::invalid(
                "max_time_window_minutes",
                format!(
                    "must be a non-negative number, got {}",
                    self.max_time_window_minutes
                ),
            ));
        }
        if !self.commission_rate.is_finite() || self.commission_rate < 0.0 {
            return Err(ConfigError::invalid(
                "commission_rate",
                format!("must be a non-negative number, got {}", self.commission_rate),
            ));
        }
        if !self.speed_factor_min_per_km.is_finite() || self.speed_factor_min_per_km <= 0.0 {
            return Err(ConfigError::invalid(
                "speed_factor_min_per_km",
                format!(
                    "must be a positive number, got {}",
                    self.speed_factor_min_per_km
                ),
            ));
        }
        Ok(())
    }
}
