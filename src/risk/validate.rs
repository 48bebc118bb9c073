//! Bounds checks reported to the consuming risk engine.
//!
//! Nothing here is enforced on decode; callers decide what to do with the
//! returned violations.

use std::fmt;

use super::{AdvancedField, RiskControlConfig};

/// A single out-of-bounds parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Wire key of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl RiskControlConfig {
    /// Collects every bound this config violates. Empty when all bounds hold.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.max_positions < 0 {
            violations.push(violation("MaxPositions", "must be non-negative"));
        }
        if self.btc_eth_max_leverage < 1 {
            violations.push(violation("BTCETHMaxLeverage", "must be at least 1"));
        }
        if self.altcoin_max_leverage < 1 {
            violations.push(violation("AltcoinMaxLeverage", "must be at least 1"));
        }
        check_non_negative(&mut violations, "MinRiskRewardRatio", self.min_risk_reward_ratio);
        if !(0.0..=1.0).contains(&self.max_margin_usage) {
            violations.push(violation("MaxMarginUsage", "must be between 0 and 1"));
        }
        check_non_negative(&mut violations, "MaxPositionRatio", self.max_position_ratio);
        check_non_negative(&mut violations, "MinPositionSize", self.min_position_size);
        if !(0..=100).contains(&self.min_confidence) {
            violations.push(violation("MinConfidence", "must be between 0 and 100"));
        }

        for param in self.params() {
            check_non_negative(&mut violations, param.field().name(), param.value().as_f64());
        }

        if let (Some(min), Some(max)) = (self.min_stop_loss_pct, self.max_stop_loss_pct) {
            if min > max {
                violations.push(violation(
                    AdvancedField::MinStopLossPct.name(),
                    format!("must not exceed MaxStopLossPct ({} > {})", min, max),
                ));
            }
        }

        violations
    }
}

fn violation(field: &'static str, message: impl Into<String>) -> Violation {
    Violation {
        field,
        message: message.into(),
    }
}

fn check_non_negative(violations: &mut Vec<Violation>, field: &'static str, v: f64) {
    if !v.is_finite() {
        violations.push(violation(field, "must be a finite number"));
    } else if v < 0.0 {
        violations.push(violation(field, "must be non-negative"));
    }
}
