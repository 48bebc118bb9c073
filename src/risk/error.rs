//! Risk control configuration error types.

use thiserror::Error;

use super::{AdvancedField, AdvancedKind};

/// Error raised by the risk control configuration.
#[derive(Debug, Error)]
pub enum RiskConfigError {
    /// A basic field is missing or mistyped, or an advanced field has the wrong type.
    #[error("malformed risk control config: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The value of an absent advanced field was requested.
    #[error("advanced parameter {0} is not set")]
    NotSet(AdvancedField),
    #[error("advanced parameter {field} expects a {expected:?} value")]
    TypeMismatch {
        field: AdvancedField,
        expected: AdvancedKind,
    },
    #[error("unknown advanced parameter: {0}")]
    UnknownField(String),
}
