//! Display units and ranging conversions.
//!
//! The pipeline works in radians and meters. These helpers convert to the
//! units a report or plot asks for.

use std::f64::consts::PI;
use std::fmt;

use crate::constants::SPEED_OF_LIGHT;

/// Angle unit for phase values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl AngleUnit {
    /// Convert a value expressed in this unit to radians
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Radians => value,
            AngleUnit::Degrees => value.to_radians(),
        }
    }

    /// Convert a value in radians to this unit
    pub fn express_radians(self, radians: f64) -> f64 {
        match self {
            AngleUnit::Radians => radians,
            AngleUnit::Degrees => radians.to_degrees(),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AngleUnit::Radians => "rad",
            AngleUnit::Degrees => "deg",
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Length unit for distances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Meters,
    Centimeters,
}

impl LengthUnit {
    /// Convert a value in meters to this unit
    pub fn express_meters(self, meters: f64) -> f64 {
        match self {
            LengthUnit::Meters => meters,
            LengthUnit::Centimeters => meters * 100.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Meters => "m",
            LengthUnit::Centimeters => "cm",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Distance at which the measured phase wraps past 2π, in meters
pub fn unambiguous_range(modulation_frequency: f64) -> f64 {
    0.5 * SPEED_OF_LIGHT / modulation_frequency
}

/// Convert a phase in radians to a distance in meters
pub fn phase_to_distance(phase: f64, unambiguous_range: f64) -> f64 {
    0.5 * phase / PI * unambiguous_range
}

/// Convert a distance in meters to a phase in radians
pub fn distance_to_phase(distance: f64, unambiguous_range: f64) -> f64 {
    2.0 * PI * distance / unambiguous_range
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unambiguous_range_20mhz() {
        assert_relative_eq!(unambiguous_range(20e6), 7.4948, epsilon = 1e-4);
    }

    #[test]
    fn test_phase_distance_roundtrip_at_full_cycle() {
        let range = unambiguous_range(20e6);
        assert_relative_eq!(phase_to_distance(2.0 * PI, range), range, epsilon = 1e-12);
        assert_relative_eq!(distance_to_phase(range / 4.0, range), PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_units() {
        assert_relative_eq!(AngleUnit::Degrees.to_radians(180.0), PI, epsilon = 1e-12);
        assert_relative_eq!(AngleUnit::Degrees.express_radians(PI / 2.0), 90.0, epsilon = 1e-12);
        assert_eq!(AngleUnit::Radians.to_radians(1.25), 1.25);
    }

    #[test]
    fn test_length_units() {
        assert_relative_eq!(LengthUnit::Centimeters.express_meters(0.0125), 1.25, epsilon = 1e-12);
        assert_eq!(LengthUnit::Meters.express_meters(3.0), 3.0);
        assert_eq!(LengthUnit::Centimeters.to_string(), "cm");
    }
}
