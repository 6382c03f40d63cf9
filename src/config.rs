//! Settings read from the environment.
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ID_OVERSHOOT_FACTOR` | Multiplier inflating each batch of requested random bytes | `1.6` |
//!
//! Values are read once, upon first use. Invalid values are reported as a warning and replaced
//! by the default.

use anyhow::Context;
use std::env;
use std::sync::LazyLock;

pub const ENV_OVERSHOOT_FACTOR: &str = "ID_OVERSHOOT_FACTOR";

/// Empirically tuned. Only the number of rounds depends on it, never the output.
pub const DEFAULT_OVERSHOOT_FACTOR: f64 = 1.6;

/// The overshoot factor from `ID_OVERSHOOT_FACTOR` or [`DEFAULT_OVERSHOOT_FACTOR`].
pub static OVERSHOOT_FACTOR: LazyLock<f64> = LazyLock::new(|| {
    let Ok(value) = env::var(ENV_OVERSHOOT_FACTOR) else {
        return DEFAULT_OVERSHOOT_FACTOR;
    };

    match parse_overshoot_factor(&value) {
        Ok(factor) => {
            tracing::debug!("Using an overshoot factor of {}", factor);
            factor
        }
        Err(err) => {
            tracing::warn!(
                "Ignoring {}: {:#}. Using {} instead.",
                ENV_OVERSHOOT_FACTOR,
                err,
                DEFAULT_OVERSHOOT_FACTOR
            );
            DEFAULT_OVERSHOOT_FACTOR
        }
    }
});

/// Parses an overshoot factor, which has to be a finite, positive number.
pub fn parse_overshoot_factor(value: &str) -> anyhow::Result<f64> {
    let factor = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("'{}' is not a number", value))?;

    validate_overshoot_factor(factor)
}

pub(crate) fn validate_overshoot_factor(factor: f64) -> anyhow::Result<f64> {
    if !factor.is_finite() || factor <= 0.0 {
        anyhow::bail!("The overshoot factor must be a positive number but was {}", factor);
    }

    Ok(factor)
}
