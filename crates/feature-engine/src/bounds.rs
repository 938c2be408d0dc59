//! Domain Bounds Checking
//!
//! Range constraints for the raw test parameters. Enforced by the input
//! collector before normalization; the normalizer itself never checks them.

use crate::inputs::RawInputs;
use thiserror::Error;

/// Activator content valid range (%)
pub const ACTIVATOR_RANGE: (f64, f64) = (0.0, 9.0);
/// Pozzolan content valid range (%)
pub const POZZOLAN_RANGE: (f64, f64) = (0.0, 30.0);
/// Allowed curing times (days)
pub const CURING_DAYS: [u8; 3] = [1, 2, 3];
/// Vertical stress valid range (kPa)
pub const STRESS_RANGE: (f64, f64) = (50.0, 150.0);
/// Loading amplitude valid range (mm)
pub const AMPLITUDE_RANGE: (f64, f64) = (0.05, 1.0);

/// Errors during bounds checking
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Curing time is not one of the tested durations
    #[error("curing_time must be one of 1, 2 or 3 days, got {0}")]
    InvalidCuringTime(u8),
}

fn check_range(field: &'static str, value: f64, range: (f64, f64)) -> Result<(), BoundsError> {
    if value < range.0 || value > range.1 || value.is_nan() {
        Err(BoundsError::OutOfRange {
            field,
            value,
            min: range.0,
            max: range.1,
        })
    } else {
        Ok(())
    }
}

/// Validate that every raw parameter lies within its documented domain.
///
/// Mirrors the constraints the form controls enforce client-side.
pub fn validate(raw: &RawInputs) -> Result<(), BoundsError> {
    check_range("activator_content", raw.activator_content, ACTIVATOR_RANGE)?;
    check_range("pozzolan_content", raw.pozzolan_content, POZZOLAN_RANGE)?;
    if !CURING_DAYS.contains(&raw.curing_time) {
        return Err(BoundsError::InvalidCuringTime(raw.curing_time));
    }
    check_range("vertical_stress", raw.vertical_stress, STRESS_RANGE)?;
    check_range("loading_amplitude", raw.loading_amplitude, AMPLITUDE_RANGE)?;
    Ok(())
}
