use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};

/// Lower bound of the canonical score scale
pub const CANONICAL_MIN: f64 = 1.0;
/// Upper bound of the canonical score scale
pub const CANONICAL_MAX: f64 = 10.0;

/// A score as published by one provider, on that provider's own scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDataProviderScore {
    pub hostname: String,
    pub value: f64,
    pub range_min: f64,
    pub range_max: f64,
}

impl MetaDataProviderScore {
    pub fn new(
        hostname: impl Into<String>,
        value: f64,
        range_min: f64,
        range_max: f64,
    ) -> AppResult<Self> {
        if !(range_min.is_finite() && range_max.is_finite()) || range_min >= range_max {
            return Err(AppError::InvalidInput(format!(
                "Score range [{}, {}] is not a valid interval",
                range_min, range_max
            )));
        }
        if !value.is_finite() || value < range_min || value > range_max {
            return Err(AppError::InvalidInput(format!(
                "Score {} is outside of range [{}, {}]",
                value, range_min, range_max
            )));
        }

        Ok(Self {
            hostname: hostname.into(),
            value,
            range_min,
            range_max,
        })
    }

    /// Rescale onto the canonical 1.0-10.0 scale
    pub fn normalized(&self) -> f64 {
        let span = CANONICAL_MAX - CANONICAL_MIN;
        CANONICAL_MIN + (self.value - self.range_min) / (self.range_max - self.range_min) * span
    }
}
