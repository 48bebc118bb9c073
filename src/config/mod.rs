//! Configuration loading for risk control profiles.
//!
//! Uses serde_yaml to load a YAML file holding one risk control config per
//! strategy, with environment variable overrides for application settings.

mod app;
mod error;

pub use app::AppConfig;
pub use error::ConfigError;

use crate::risk::{RiskControlConfig, Violation};
use serde::Deserialize;
use std::{collections::BTreeMap, env, fs};

/// Root configuration structure.
///
/// Required sections: app, strategies.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-level settings like name and environment.
    pub app: AppConfig,
    /// Maps strategy names to their risk control configs.
    pub strategies: BTreeMap<String, RiskControlConfig>,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    ///
    /// First loads environment variables from `.env` file (if exists),
    /// then loads the YAML config and applies overrides:
    /// - `RISKCTL_ENV`, `RISKCTL_LOG_LEVEL`
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore error if not found)
        dotenvy::dotenv().ok();

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        config.load_overrides_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Risk control config for the named strategy.
    pub fn strategy(&self, name: &str) -> Option<&RiskControlConfig> {
        self.strategies.get(name)
    }

    /// Bound violations of every strategy, keyed by strategy name.
    ///
    /// Reported only; loading never rejects a config for these.
    pub fn violations(&self) -> Vec<(&str, Violation)> {
        self.strategies
            .iter()
            .flat_map(|(name, risk)| {
                risk.validate()
                    .into_iter()
                    .map(move |v| (name.as_str(), v))
            })
            .collect()
    }

    fn load_overrides_from_env(&mut self) {
        if let Ok(env) = env::var("RISKCTL_ENV") {
            self.app.env = env;
        }
        if let Ok(level) = env::var("RISKCTL_LOG_LEVEL") {
            self.app.log_level = Some(level);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.is_empty() {
            return Err(ConfigError::Validation("app.name is required".into()));
        }

        if self.strategies.is_empty() {
            return Err(ConfigError::Validation(
                "at least one strategy is required".into(),
            ));
        }

        if let Some(name) = self.strategies.keys().find(|name| name.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "strategy name {:?} must not be blank",
                name
            )));
        }

        Ok(())
    }
}

/// Load a single risk control config from a JSON file in the wire format.
pub fn load_risk_blob(path: &str) -> Result<RiskControlConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(RiskControlConfig::decode(&content)?)
}

#[cfg(test)]
mod tests;
