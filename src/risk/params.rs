//! Advanced-tier parameter identifiers and the accessor contract.
//!
//! Every advanced parameter is either absent or present with a value.
//! Accessors are keyed by [`AdvancedField`]; values are written through
//! [`AdvancedParam`], which pairs a field with a value of its own type.

use std::fmt;
use std::str::FromStr;

use super::{RiskConfigError, RiskControlConfig};

/// Value type carried by an advanced parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvancedKind {
    Float,
    Integer,
}

/// Value read back from a present advanced parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdvancedValue {
    Float(f64),
    Integer(i64),
}

impl AdvancedValue {
    pub fn kind(&self) -> AdvancedKind {
        match self {
            AdvancedValue::Float(_) => AdvancedKind::Float,
            AdvancedValue::Integer(_) => AdvancedKind::Integer,
        }
    }

    /// Numeric value as `f64`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            AdvancedValue::Float(v) => v,
            AdvancedValue::Integer(v) => v as f64,
        }
    }

    /// Integer value, `None` for float parameters.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            AdvancedValue::Integer(v) => Some(v),
            AdvancedValue::Float(_) => None,
        }
    }
}

impl From<f64> for AdvancedValue {
    fn from(v: f64) -> Self {
        AdvancedValue::Float(v)
    }
}

impl From<i64> for AdvancedValue {
    fn from(v: i64) -> Self {
        AdvancedValue::Integer(v)
    }
}

impl fmt::Display for AdvancedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvancedValue::Float(v) => write!(f, "{}", v),
            AdvancedValue::Integer(v) => write!(f, "{}", v),
        }
    }
}

trait FromAdvancedValue: Sized {
    fn from_advanced(value: AdvancedValue) -> Option<Self>;
}

impl FromAdvancedValue for f64 {
    fn from_advanced(value: AdvancedValue) -> Option<Self> {
        Some(value.as_f64())
    }
}

impl FromAdvancedValue for i64 {
    fn from_advanced(value: AdvancedValue) -> Option<Self> {
        value.as_i64()
    }
}

macro_rules! advanced_params {
    ($(
        $(#[$doc:meta])*
        $variant:ident => $field:ident: $ty:ty, $kind:ident, $wire:literal, $alias:literal;
    )*) => {
        /// Identifier of one of the advanced-tier parameters.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum AdvancedField {
            $($(#[$doc])* $variant,)*
        }

        impl AdvancedField {
            /// All advanced fields in declaration order.
            pub const ALL: &'static [AdvancedField] = &[$(AdvancedField::$variant,)*];

            /// Canonical wire key.
            pub fn name(&self) -> &'static str {
                match self {
                    $(AdvancedField::$variant => $wire,)*
                }
            }

            /// snake_case key accepted on decode.
            pub fn alias(&self) -> &'static str {
                match self {
                    $(AdvancedField::$variant => $alias,)*
                }
            }

            pub fn kind(&self) -> AdvancedKind {
                match self {
                    $(AdvancedField::$variant => AdvancedKind::$kind,)*
                }
            }
        }

        /// An advanced field together with a value of the field's type.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum AdvancedParam {
            $($(#[$doc])* $variant($ty),)*
        }

        impl AdvancedParam {
            pub fn field(&self) -> AdvancedField {
                match self {
                    $(AdvancedParam::$variant(_) => AdvancedField::$variant,)*
                }
            }

            pub fn value(&self) -> AdvancedValue {
                match *self {
                    $(AdvancedParam::$variant(v) => AdvancedValue::from(v),)*
                }
            }

            /// Builds a parameter from a dynamically typed value.
            ///
            /// Integers are accepted for float fields; floats are rejected for
            /// integer fields.
            pub fn from_value(
                field: AdvancedField,
                value: AdvancedValue,
            ) -> Result<Self, RiskConfigError> {
                let param = match field {
                    $(AdvancedField::$variant => {
                        <$ty as FromAdvancedValue>::from_advanced(value).map(AdvancedParam::$variant)
                    })*
                };
                param.ok_or(RiskConfigError::TypeMismatch {
                    field,
                    expected: field.kind(),
                })
            }
        }

        impl RiskControlConfig {
            /// Reports whether the field is present.
            pub fn is_set(&self, field: AdvancedField) -> bool {
                match field {
                    $(AdvancedField::$variant => self.$field.is_some(),)*
                }
            }

            /// Returns the value of a present field.
            ///
            /// Fails with [`RiskConfigError::NotSet`] when the field is absent;
            /// absence is never reported as a zero value.
            pub fn get(&self, field: AdvancedField) -> Result<AdvancedValue, RiskConfigError> {
                self.param(field)
                    .map(|p| p.value())
                    .ok_or(RiskConfigError::NotSet(field))
            }

            /// Returns the field as a typed parameter when present.
            pub fn param(&self, field: AdvancedField) -> Option<AdvancedParam> {
                match field {
                    $(AdvancedField::$variant => self.$field.map(AdvancedParam::$variant),)*
                }
            }

            /// Marks the parameter's field present with its value, replacing any
            /// previous value.
            pub fn set(&mut self, param: AdvancedParam) {
                match param {
                    $(AdvancedParam::$variant(v) => self.$field = Some(v),)*
                }
            }

            /// Marks the field absent.
            pub fn unset(&mut self, field: AdvancedField) {
                match field {
                    $(AdvancedField::$variant => self.$field = None,)*
                }
            }

            $(
                $(#[$doc])*
                pub fn $field(&self) -> Option<$ty> {
                    self.$field
                }
            )*
        }
    };
}

advanced_params! {
    /// Fraction of capital used as the base sizing unit.
    BaseCapitalRatio => base_capital_ratio: f64, Float,
        "BaseCapitalRatio", "base_capital_ratio";
    /// Fraction of realized profit moved into the anti-martingale pool.
    AntiMartingaleProfitConversion => anti_martingale_profit_conversion: f64, Float,
        "AntiMartingaleProfitConversion", "anti_martingale_profit_conversion";
    /// Fraction of the anti-martingale pool usable per trade.
    AntiMartingaleUsageRatio => anti_martingale_usage_ratio: f64, Float,
        "AntiMartingaleUsageRatio", "anti_martingale_usage_ratio";
    /// Cap on the anti-martingale pool size.
    AntiMartingalePoolLimit => anti_martingale_pool_limit: f64, Float,
        "AntiMartingalePoolLimit", "anti_martingale_pool_limit";
    /// Minimum allowed stop-loss distance.
    MinStopLossPct => min_stop_loss_pct: f64, Float,
        "MinStopLossPct", "min_stop_loss_pct";
    /// Maximum allowed stop-loss distance.
    MaxStopLossPct => max_stop_loss_pct: f64, Float,
        "MaxStopLossPct", "max_stop_loss_pct";
    /// Daily trade-count cap.
    MaxDailyTrades => max_daily_trades: i64, Integer,
        "MaxDailyTrades", "max_daily_trades";
    /// Cumulative loss fraction that halts trading.
    TotalLossCircuitBreaker => total_loss_circuit_breaker: f64, Float,
        "TotalLossCircuitBreaker", "total_loss_circuit_breaker";
    /// Profit interval that triggers scaling into a position.
    AddPositionProfitInterval => add_position_profit_interval: f64, Float,
        "AddPositionProfitInterval", "add_position_profit_interval";
    /// Size increment ratio when scaling in.
    AddPositionRatio => add_position_ratio: f64, Float,
        "AddPositionRatio", "add_position_ratio";
    /// Cap on cumulative added size.
    AddPositionCumulativeLimit => add_position_cumulative_limit: f64, Float,
        "AddPositionCumulativeLimit", "add_position_cumulative_limit";
    /// Safety buffer required before scaling in.
    AddPositionSafetyMargin => add_position_safety_margin: f64, Float,
        "AddPositionSafetyMargin", "add_position_safety_margin";
    /// Size decrement ratio when scaling out.
    ReducePositionRatio => reduce_position_ratio: f64, Float,
        "ReducePositionRatio", "reduce_position_ratio";
}

impl fmt::Display for AdvancedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AdvancedField {
    type Err = RiskConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AdvancedField::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s || f.alias() == s)
            .ok_or_else(|| RiskConfigError::UnknownField(s.to_string()))
    }
}
