//! Agent configuration.
//!
//! Everything has a default, so a config file only needs the values it
//! changes. TOML is the hand-written format; tuned weight profiles are JSON.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::depth::DepthConfig;
use crate::eval::EvalWeights;
use crate::ordering::OrderingWeights;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse JSON profile: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Per-move time limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Share of the remaining game clock one move may use
    pub max_move_fraction: f64,
    /// Kept in reserve on every move
    pub safety_margin_ms: u64,
    /// Floor for the per-move limit
    pub min_move_time_ms: u64,
    /// Nodes between clock reads
    pub check_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_move_fraction: 0.1,
            safety_margin_ms: 50,
            min_move_time_ms: 10,
            check_interval: 64,
        }
    }
}

impl SearchConfig {
    /// Hard limit for the next move, never more than `remaining`.
    pub fn move_time(&self, remaining: Duration) -> Duration {
        let share = remaining.mul_f64(self.max_move_fraction.clamp(0.0, 1.0));
        let limit = share
            .saturating_sub(Duration::from_millis(self.safety_margin_ms))
            .max(Duration::from_millis(self.min_move_time_ms));
        limit.min(remaining)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub search: SearchConfig,
    pub depth: DepthConfig,
    pub eval: EvalWeights,
    pub ordering: OrderingWeights,
}

impl AgentConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: AgentConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: AgentConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` profile or a TOML file (any other extension).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.depth;
        if d.initial_depth == 0 {
            return Err(ConfigError::Invalid("initial_depth must be at least 1".into()));
        }
        if d.initial_depth > d.max_depth_limit {
            return Err(ConfigError::Invalid(format!(
                "initial_depth {} exceeds max_depth_limit {}",
                d.initial_depth, d.max_depth_limit
            )));
        }
        let fractions = [
            d.increase_fraction,
            d.critical_fraction,
            d.decrease_fraction,
            self.search.max_move_fraction,
        ];
        if fractions.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(ConfigError::Invalid("time fractions must be finite and non-negative".into()));
        }
        if self.search.check_interval == 0 {
            return Err(ConfigError::Invalid("check_interval must be positive".into()));
        }
        if !self.eval.is_valid() || !self.ordering.is_valid() {
            return Err(ConfigError::Invalid("weights must be finite".into()));
        }
        if !self.eval.attack.is_monotone() || !self.eval.defense.is_monotone() {
            return Err(ConfigError::Invalid(
                "weight policies must not drop as the weakest board loses stones".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
