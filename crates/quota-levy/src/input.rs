//! Validation for user-supplied form values.
//!
//! Counts are clamped, enumerated fields are rejected when they fall outside
//! the supported set.

use crate::levy::UnsupportedContractTerm;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("tax rate must be one of 10%, 20%, 22% or 25%, got {0}")]
    UnsupportedTaxRate(f64),
    #[error(transparent)]
    ContractTerm(#[from] UnsupportedContractTerm),
    #[error("company name must not be empty")]
    EmptyName,
    #[error("total workers must be at least 1")]
    EmptyWorkforce,
}

/// Negative counts become zero; oversized ones saturate.
pub fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
