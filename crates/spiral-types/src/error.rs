// ─────────────────────────────────────────────────────────────────────
// Spiral Twin — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpiralError {
    #[error("Unknown mineral '{name}' in {table}")]
    UnknownMineral { table: &'static str, name: String },

    #[error("Mineral '{name}' missing from {table}")]
    MissingMineral { table: &'static str, name: String },

    #[error("Parameter out of range: {name}={value} (expected {expected})")]
    OutOfRange {
        name: String,
        value: f64,
        expected: &'static str,
    },

    #[error("Parameter is not finite: {name}={value}")]
    NonFinite { name: String, value: f64 },

    #[error("Invalid sweep axis '{axis}': {message}")]
    InvalidSweep { axis: &'static str, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SpiralResult<T> = Result<T, SpiralError>;

/// Reject NaN and infinities.
pub fn ensure_finite(name: &str, value: f64) -> SpiralResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SpiralError::NonFinite {
            name: name.to_string(),
            value,
        })
    }
}

/// Reject values outside the closed interval `[min, max]`.
pub fn ensure_in_range(
    name: &str,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) -> SpiralResult<f64> {
    ensure_finite(name, value)?;
    if value < min || value > max {
        return Err(SpiralError::OutOfRange {
            name: name.to_string(),
            value,
            expected,
        });
    }
    Ok(value)
}
