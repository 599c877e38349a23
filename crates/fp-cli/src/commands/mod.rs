//! CLI subcommand implementations.

pub mod history;
pub mod init;
pub mod pantry;
pub mod plan;
pub mod race;
pub mod settings;
pub mod station;

use fp_core::state::Settings;
use fp_core::units::{self, DistanceUnit, ElevationUnit, VolumeUnit};

/// Formats an internal kilometer distance in the configured display unit.
fn display_distance(km: f64, settings: &Settings) -> String {
    let value = units::convert_distance(km, DistanceUnit::Kilometers, settings.distance_unit);
    units::format_distance(value, settings.distance_unit)
}

/// Formats an internal meter elevation in the configured display unit.
fn display_elevation(meters: f64, settings: &Settings) -> String {
    let value = units::convert_elevation(meters, ElevationUnit::Meters, settings.elevation_unit);
    units::format_elevation(value, settings.elevation_unit)
}

/// Formats an internal milliliter volume in the configured display unit.
fn display_volume(ml: f64, settings: &Settings) -> String {
    let value = units::convert_volume(ml, VolumeUnit::Milliliters, settings.volume_unit);
    format!("{value:.0}{}", settings.volume_unit)
}

/// Converts a user-entered distance from the configured unit to kilometers.
fn input_distance_km(value: f64, settings: &Settings) -> f64 {
    units::convert_distance(value, settings.distance_unit, DistanceUnit::Kilometers)
}

/// Converts a user-entered elevation from the configured unit to meters.
#[expect(clippy::cast_possible_truncation, reason = "rounded before the cast")]
fn input_elevation_m(value: f64, settings: &Settings) -> i32 {
    units::convert_elevation(value, settings.elevation_unit, ElevationUnit::Meters).round() as i32
}

/// Derives a lowercase id from a display name.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Maurten Gel 100"), "maurten-gel-100");
        assert_eq!(slugify("  Col du  Bonhomme! "), "col-du-bonhomme");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn display_helpers_respect_settings() {
        let mut settings = Settings::default();
        assert_eq!(display_distance(10.0, &settings), "10.0km");
        assert_eq!(display_volume(500.0, &settings), "500ml");

        settings.distance_unit = DistanceUnit::Miles;
        assert_eq!(display_distance(10.0, &settings), "6.2mi");
    }

    #[test]
    fn input_helpers_convert_to_internal_units() {
        let mut settings = Settings::default();
        assert!((input_distance_km(10.0, &settings) - 10.0).abs() < f64::EPSILON);

        settings.distance_unit = DistanceUnit::Miles;
        assert!((input_distance_km(10.0, &settings) - 16.0934).abs() < 1e-9);

        settings.elevation_unit = ElevationUnit::Feet;
        assert_eq!(input_elevation_m(1000.0, &settings), 305);
    }
}
