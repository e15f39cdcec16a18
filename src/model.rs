//! Regression model and its input.

use serde::{Deserialize, Serialize};

/// Number of features the model is fitted on.
pub const N_FEATURES: usize = 3;

/// Trained linear regression: `price = intercept + coefficients · features`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    /// Weights in the fixed feature order: area, bedrooms, age.
    pub coefficients: Vec<f64>,

    pub intercept: f64,
}

impl RegressionModel {
    pub fn new(coefficients: [f64; N_FEATURES], intercept: f64) -> Self {
        Self {
            coefficients: coefficients.to_vec(),
            intercept,
        }
    }
}

/// Single prediction input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseFeatures {
    pub area: f64,
    pub bedrooms: u32,
    pub age: f64,
}

/// Request field out of its domain.
#[derive(Debug, thiserror::Error)]
#[error("`{field}` must be a non-negative number, got {value}")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f64,
}

impl HouseFeatures {
    pub fn new(area: f64, bedrooms: u32, age: f64) -> Result<Self, ValidationError> {
        for (field, value) in [("area", area), ("age", age)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ValidationError { field, value });
            }
        }
        Ok(Self {
            area,
            bedrooms,
            age,
        })
    }

    /// Feature vector in the column order the model was fitted on.
    #[must_use]
    pub fn to_vector(&self) -> [f64; N_FEATURES] {
        [self.area, f64::from(self.bedrooms), self.age]
    }
}
