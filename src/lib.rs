//! Tiered risk control configuration for a trading strategy engine.
//!
//! [`risk::RiskControlConfig`] holds the mandatory basic limits and the
//! optional advanced parameters; [`config::Config`] loads named profiles
//! from YAML.

pub mod config;
pub mod risk;

pub use risk::{
    AdvancedField, AdvancedKind, AdvancedParam, AdvancedValue, BasicLimits, RiskConfigError,
    RiskControlConfig, Violation,
};
