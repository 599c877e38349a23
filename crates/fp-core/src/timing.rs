//! Elapsed-time codec and pace arithmetic.
//!
//! Race times are carried around as `HH:MM:SS` strings (that is what the
//! LiveTrail feed publishes and what profiles persist). This module converts
//! between those strings and seconds, and derives paces from them.

use thiserror::Error;

/// Error for malformed `HH:MM:SS` strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    /// The string did not have exactly three colon-separated components.
    #[error("expected HH:MM:SS, got {value:?}")]
    ComponentCount { value: String },

    /// A component was not an integer.
    #[error("non-numeric time component {component:?} in {value:?}")]
    NonNumeric { value: String, component: String },
}

/// Parses an `HH:MM:SS` string into total seconds.
///
/// Parsing is deliberately permissive beyond the shape check: components are
/// not range-checked, so `"00:99:00"` and negative components are accepted
/// as-is.
pub fn parse_time(value: &str) -> Result<i64, TimeFormatError> {
    let mut components = [0_i64; 3];
    let mut count = 0;
    for part in value.split(':') {
        if count == 3 {
            return Err(TimeFormatError::ComponentCount {
                value: value.to_string(),
            });
        }
        components[count] = part.parse().map_err(|_| TimeFormatError::NonNumeric {
            value: value.to_string(),
            component: part.to_string(),
        })?;
        count += 1;
    }
    if count != 3 {
        return Err(TimeFormatError::ComponentCount {
            value: value.to_string(),
        });
    }
    Ok(components[0] * 3600 + components[1] * 60 + components[2])
}

/// Formats seconds as `HH:MM:SS`.
///
/// Fractional seconds are truncated. Hours are unbounded rather than wrapped
/// at 24. Non-finite inputs follow float-to-int cast saturation, so NaN
/// renders as `00:00:00`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation toward zero is the defined formatting behavior"
)]
pub fn format_time(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor() as i64;
    let minutes = (seconds % 3600.0 / 60.0).floor() as i64;
    let secs = (seconds % 60.0).floor() as i64;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Parses an `HH:MM:SS` string into fractional hours.
pub fn time_to_hours(value: &str) -> Result<f64, TimeFormatError> {
    #[expect(clippy::cast_precision_loss, reason = "race durations are small")]
    let seconds = parse_time(value)? as f64;
    Ok(seconds / 3600.0)
}

/// Pace in minutes per kilometer implied by covering `distance_km` in
/// `seconds`.
///
/// A zero distance yields a non-finite pace; guarding against that is the
/// caller's responsibility.
#[must_use]
pub fn pace_min_per_km(distance_km: f64, seconds: f64) -> f64 {
    seconds / (distance_km * 60.0)
}

/// Estimated `HH:MM:SS` time to cover `distance_km` at `pace_min_per_km`.
#[must_use]
pub fn estimated_time(distance_km: f64, pace_min_per_km: f64) -> String {
    format_time(distance_km * pace_min_per_km * 60.0)
}
