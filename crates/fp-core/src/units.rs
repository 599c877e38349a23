//! Unit conversions and display formatting.
//!
//! Conversion factors reproduce the web client's literal constants so that
//! displayed values are bit-identical. Note the distance pair (0.621371 and
//! 1.60934) is not an exact reciprocal; round trips are approximate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for unrecognized unit strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} unit: {value}")]
pub struct UnknownUnit {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! unit_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            /// Display suffix for this unit.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownUnit;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownUnit { kind: $kind, value: s.to_string() }),
                }
            }
        }
    };
}

unit_enum!(
    /// Distance display unit.
    DistanceUnit, "distance" { Kilometers => "km", Miles => "mi" }
);

unit_enum!(
    /// Elevation display unit.
    ElevationUnit, "elevation" { Meters => "m", Feet => "ft" }
);

unit_enum!(
    /// Pace display unit.
    PaceUnit, "pace" {
        KmPerHour => "km/h",
        MinPerKm => "min/km",
        MinPerMile => "min/mi",
        MilesPerHour => "mph",
    }
);

unit_enum!(
    /// Volume display unit.
    VolumeUnit, "volume" { Milliliters => "ml", Ounces => "oz" }
);

/// Converts a distance between kilometers and miles.
#[must_use]
pub fn convert_distance(value: f64, from: DistanceUnit, to: DistanceUnit) -> f64 {
    if from == to {
        return value;
    }
    match from {
        DistanceUnit::Kilometers => value * 0.621371,
        DistanceUnit::Miles => value * 1.60934,
    }
}

/// Converts an elevation between meters and feet.
#[must_use]
pub fn convert_elevation(value: f64, from: ElevationUnit, to: ElevationUnit) -> f64 {
    if from == to {
        return value;
    }
    match from {
        ElevationUnit::Meters => value * 3.28084,
        ElevationUnit::Feet => value * 0.3048,
    }
}

/// Converts a pace between the four supported units, via min/km as the base.
///
/// A zero pace divides by zero and yields a non-finite result; guarding
/// against zero input is the caller's responsibility.
#[must_use]
pub fn convert_pace(value: f64, from: PaceUnit, to: PaceUnit) -> f64 {
    if from == to {
        return value;
    }

    let base = match from {
        PaceUnit::KmPerHour => 60.0 / value,
        PaceUnit::MinPerKm => value,
        PaceUnit::MinPerMile => value / 1.60934,
        PaceUnit::MilesPerHour => 60.0 / (value * 1.60934),
    };

    match to {
        PaceUnit::KmPerHour => 60.0 / base,
        PaceUnit::MinPerKm => base,
        PaceUnit::MinPerMile => base * 1.60934,
        PaceUnit::MilesPerHour => 60.0 / (base * 1.60934),
    }
}

/// Converts a volume between milliliters and ounces.
///
/// A single constant serves both directions: ml to oz multiplies, oz to ml
/// divides.
#[must_use]
pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    if from == to {
        return value;
    }
    match from {
        VolumeUnit::Milliliters => value * 0.033814,
        VolumeUnit::Ounces => value / 0.033814,
    }
}

/// Formats a distance with one decimal and the unit suffix.
#[must_use]
pub fn format_distance(value: f64, unit: DistanceUnit) -> String {
    format!("{value:.1}{unit}")
}

/// Formats an elevation rounded to an integer with the unit suffix.
#[must_use]
#[expect(clippy::cast_possible_truncation, reason = "rounded before the cast")]
pub fn format_elevation(value: f64, unit: ElevationUnit) -> String {
    format!("{}{unit}", value.round() as i64)
}

/// Formats a pace: `M:SS` for min/km and min/mi, one decimal otherwise.
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "non-negative paces")]
pub fn format_pace(value: f64, unit: PaceUnit) -> String {
    match unit {
        PaceUnit::MinPerKm | PaceUnit::MinPerMile => {
            let minutes = value.floor() as u64;
            #[expect(clippy::cast_precision_loss, reason = "minutes are small")]
            let seconds = ((value - minutes as f64) * 60.0).round() as u64;
            format!("{minutes}:{seconds:02}")
        }
        PaceUnit::KmPerHour | PaceUnit::MilesPerHour => format!("{value:.1}"),
    }
}
