use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not parse engine config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("engine config validation failed: {0}")]
    Validation(String),
}

/// Tunable guardrails for the pricing engine. Loaded from toml by embedding
/// applications; defaults are safe for production use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest percentage value a catalog rule may carry. Authoring guard,
    /// not a runtime clamp.
    pub max_discount_pct: Decimal,
    /// Quantity ladder used by savings projections.
    pub summary_quantities: Vec<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_discount_pct: Decimal::from(50),
            summary_quantities: vec![1, 5, 10, 25, 50, 100],
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_discount_pct <= Decimal::ZERO || self.max_discount_pct > Decimal::from(100) {
            return Err(ConfigError::Validation(format!(
                "max_discount_pct must be in (0, 100], got {}",
                self.max_discount_pct
            )));
        }
        if self.summary_quantities.is_empty() {
            return Err(ConfigError::Validation(
                "summary_quantities must not be empty".to_string(),
            ));
        }
        if self.summary_quantities.contains(&0) {
            return Err(ConfigError::Validation(
                "summary_quantities must not contain zero".to_string(),
            ));
        }
        Ok(())
    }
}
