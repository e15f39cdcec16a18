use std::str::FromStr;

use crate::prelude::*;

pub fn sample_rate(value: &str) -> Result<f32> {
    match f32::from_str(value)? {
        value if (0.0..=1.0).contains(&value) => Ok(value),
        _ => Err(anyhow!("expected a number from 0 to 1")),
    }
}
