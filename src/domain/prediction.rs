use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of multipliers drawn from the low band.
const LOW_BAND_CHANCE: f64 = 0.8;
const LOW_BAND: (f64, f64) = (1.0, 10.99);
const HIGH_BAND: (f64, f64) = (11.0, 99.99);

/// A generated multiplier together with the moment it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub value: Decimal,
    pub created: DateTime<Utc>,
}

impl Prediction {
    pub fn new(value: Decimal, created: DateTime<Utc>) -> Self {
        Self { value, created }
    }

    /// Draws a fresh multiplier stamped with the current time.
    pub fn generate() -> Self {
        Self::new(generate_multiplier(&mut rand::thread_rng()), Utc::now())
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.value)
    }
}

/// Weighted multiplier: mostly small values, occasionally a large one.
pub fn generate_multiplier<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    let (low, high) = if rng.gen_bool(LOW_BAND_CHANCE) {
        LOW_BAND
    } else {
        HIGH_BAND
    };
    let raw = rng.gen_range(low..high);
    Decimal::from_f64_retain(raw)
        .unwrap_or(Decimal::ONE)
        .round_dp(2)
}
