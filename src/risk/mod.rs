//! Tiered risk control configuration for a trading strategy.
//!
//! The basic tier holds eight mandatory limits. The advanced tier holds
//! thirteen parameters that are each independently absent or present.
//! An absent parameter is omitted from the wire form entirely, so a
//! parameter configured as zero stays distinguishable from one that was
//! never configured.

mod error;
mod params;
mod validate;

pub use error::RiskConfigError;
pub use params::{AdvancedField, AdvancedKind, AdvancedParam, AdvancedValue};
pub use validate::Violation;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mandatory basic-tier limits, required to build a [`RiskControlConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicLimits {
    pub max_positions: i64,
    pub btc_eth_max_leverage: i64,
    pub altcoin_max_leverage: i64,
    pub min_risk_reward_ratio: f64,
    pub max_margin_usage: f64,
    pub max_position_ratio: f64,
    pub min_position_size: f64,
    pub min_confidence: i64,
}

/// Risk posture of one strategy instance.
///
/// Basic fields are public. Advanced fields are reached through
/// [`is_set`](Self::is_set), [`get`](Self::get), [`set`](Self::set) and
/// [`unset`](Self::unset), or the typed getters returning `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskControlConfig {
    // === Basic tier ===
    /// Maximum concurrent open positions.
    #[serde(rename = "MaxPositions", alias = "max_positions")]
    pub max_positions: i64,
    /// Maximum leverage for BTC/ETH instruments.
    #[serde(rename = "BTCETHMaxLeverage", alias = "btc_eth_max_leverage")]
    pub btc_eth_max_leverage: i64,
    /// Maximum leverage for altcoin instruments.
    #[serde(rename = "AltcoinMaxLeverage", alias = "altcoin_max_leverage")]
    pub altcoin_max_leverage: i64,
    /// Minimum reward:risk ratio required to open a position.
    #[serde(rename = "MinRiskRewardRatio", alias = "min_risk_reward_ratio")]
    pub min_risk_reward_ratio: f64,
    /// Maximum usable fraction of margin capacity.
    #[serde(rename = "MaxMarginUsage", alias = "max_margin_usage")]
    pub max_margin_usage: f64,
    /// Maximum position size relative to account equity.
    #[serde(rename = "MaxPositionRatio", alias = "max_position_ratio")]
    pub max_position_ratio: f64,
    /// Minimum size to open a position.
    #[serde(rename = "MinPositionSize", alias = "min_position_size")]
    pub min_position_size: f64,
    /// Minimum signal confidence (0-100) to act.
    #[serde(rename = "MinConfidence", alias = "min_confidence")]
    pub min_confidence: i64,

    // === Advanced tier ===
    #[serde(
        rename = "BaseCapitalRatio",
        alias = "base_capital_ratio",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    base_capital_ratio: Option<f64>,
    #[serde(
        rename = "AntiMartingaleProfitConversion",
        alias = "anti_martingale_profit_conversion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    anti_martingale_profit_conversion: Option<f64>,
    #[serde(
        rename = "AntiMartingaleUsageRatio",
        alias = "anti_martingale_usage_ratio",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    anti_martingale_usage_ratio: Option<f64>,
    #[serde(
        rename = "AntiMartingalePoolLimit",
        alias = "anti_martingale_pool_limit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    anti_martingale_pool_limit: Option<f64>,
    #[serde(
        rename = "MinStopLossPct",
        alias = "min_stop_loss_pct",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    min_stop_loss_pct: Option<f64>,
    #[serde(
        rename = "MaxStopLossPct",
        alias = "max_stop_loss_pct",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    max_stop_loss_pct: Option<f64>,
    #[serde(
        rename = "MaxDailyTrades",
        alias = "max_daily_trades",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    max_daily_trades: Option<i64>,
    #[serde(
        rename = "TotalLossCircuitBreaker",
        alias = "total_loss_circuit_breaker",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    total_loss_circuit_breaker: Option<f64>,
    #[serde(
        rename = "AddPositionProfitInterval",
        alias = "add_position_profit_interval",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    add_position_profit_interval: Option<f64>,
    #[serde(
        rename = "AddPositionRatio",
        alias = "add_position_ratio",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    add_position_ratio: Option<f64>,
    #[serde(
        rename = "AddPositionCumulativeLimit",
        alias = "add_position_cumulative_limit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    add_position_cumulative_limit: Option<f64>,
    #[serde(
        rename = "AddPositionSafetyMargin",
        alias = "add_position_safety_margin",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    add_position_safety_margin: Option<f64>,
    #[serde(
        rename = "ReducePositionRatio",
        alias = "reduce_position_ratio",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    reduce_position_ratio: Option<f64>,
}

impl RiskControlConfig {
    /// Creates a config from the basic tier with every advanced parameter absent.
    pub fn new(basic: BasicLimits) -> Self {
        let BasicLimits {
            max_positions,
            btc_eth_max_leverage,
            altcoin_max_leverage,
            min_risk_reward_ratio,
            max_margin_usage,
            max_position_ratio,
            min_position_size,
            min_confidence,
        } = basic;

        Self {
            max_positions,
            btc_eth_max_leverage,
            altcoin_max_leverage,
            min_risk_reward_ratio,
            max_margin_usage,
            max_position_ratio,
            min_position_size,
            min_confidence,
            base_capital_ratio: None,
            anti_martingale_profit_conversion: None,
            anti_martingale_usage_ratio: None,
            anti_martingale_pool_limit: None,
            min_stop_loss_pct: None,
            max_stop_loss_pct: None,
            max_daily_trades: None,
            total_loss_circuit_breaker: None,
            add_position_profit_interval: None,
            add_position_ratio: None,
            add_position_cumulative_limit: None,
            add_position_safety_margin: None,
            reduce_position_ratio: None,
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, param: AdvancedParam) -> Self {
        self.set(param);
        self
    }

    pub fn basic(&self) -> BasicLimits {
        BasicLimits {
            max_positions: self.max_positions,
            btc_eth_max_leverage: self.btc_eth_max_leverage,
            altcoin_max_leverage: self.altcoin_max_leverage,
            min_risk_reward_ratio: self.min_risk_reward_ratio,
            max_margin_usage: self.max_margin_usage,
            max_position_ratio: self.max_position_ratio,
            min_position_size: self.min_position_size,
            min_confidence: self.min_confidence,
        }
    }

    /// Present advanced parameters in declaration order.
    pub fn params(&self) -> impl Iterator<Item = AdvancedParam> + '_ {
        AdvancedField::ALL.iter().filter_map(|f| self.param(*f))
    }

    /// Number of present advanced parameters.
    pub fn set_count(&self) -> usize {
        self.params().count()
    }

    /// Encodes to the JSON wire form.
    ///
    /// Absent advanced parameters are omitted. Non-finite floats are
    /// rejected since JSON would carry them as `null`.
    pub fn encode(&self) -> Result<String, RiskConfigError> {
        self.ensure_finite()?;
        let json = serde_json::to_string(self)?;
        debug!(advanced = self.set_count(), bytes = json.len(), "Encoded risk control config");
        Ok(json)
    }

    /// Encodes to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, RiskConfigError> {
        self.ensure_finite()?;
        Ok(serde_json::to_value(self)?)
    }

    /// Decodes from the JSON wire form.
    pub fn decode(s: &str) -> Result<Self, RiskConfigError> {
        let config: Self = serde_json::from_str(s)?;
        Ok(config.decoded())
    }

    /// Decodes from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, RiskConfigError> {
        let config: Self = serde_json::from_value(value)?;
        Ok(config.decoded())
    }

    fn decoded(self) -> Self {
        debug!(advanced = self.set_count(), "Decoded risk control config");
        self
    }

    fn ensure_finite(&self) -> Result<(), RiskConfigError> {
        let basic = [
            ("MinRiskRewardRatio", self.min_risk_reward_ratio),
            ("MaxMarginUsage", self.max_margin_usage),
            ("MaxPositionRatio", self.max_position_ratio),
            ("MinPositionSize", self.min_position_size),
        ];
        let advanced = self.params().map(|p| (p.field().name(), p.value().as_f64()));

        for (name, v) in basic.into_iter().chain(advanced) {
            if !v.is_finite() {
                let err = <serde_json::Error as serde::ser::Error>::custom(format!(
                    "{} is not a finite number: {}",
                    name, v
                ));
                return Err(RiskConfigError::Malformed(err));
            }
        }
        Ok(())
    }
}
