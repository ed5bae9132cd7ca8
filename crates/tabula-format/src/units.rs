//! Unit preferences and conversions from canonical units.
//!
//! Quantities are stored canonically: distances in kilometers, speeds in km/h and pressures in
//! bar. Each unit enum converts a canonical value into itself and names its display suffix.

use serde::{Deserialize, Serialize};

const KM_PER_MILE: f64 = 1.609_344;
const KM_PER_NAUTICAL_MILE: f64 = 1.852;
const PSI_PER_BAR: f64 = 14.503_773_773;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Meters,
    Miles,
    NauticalMiles,
}

impl DistanceUnit {
    pub fn convert(self, kilometers: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => kilometers,
            DistanceUnit::Meters => kilometers * 1000.0,
            DistanceUnit::Miles => kilometers / KM_PER_MILE,
            DistanceUnit::NauticalMiles => kilometers / KM_PER_NAUTICAL_MILE,
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Meters => "m",
            DistanceUnit::Miles => "mi",
            DistanceUnit::NauticalMiles => "nm",
        }
    }

    /// Parse a unit name or suffix, case-insensitively.
    pub fn parse(name: &str) -> Option<DistanceUnit> {
        match name.trim().to_ascii_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" | "kilometres" => Some(DistanceUnit::Kilometers),
            "m" | "meter" | "meters" | "metres" => Some(DistanceUnit::Meters),
            "mi" | "mile" | "miles" => Some(DistanceUnit::Miles),
            "nm" | "nmi" | "nautical_miles" | "nautical miles" => Some(DistanceUnit::NauticalMiles),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    #[default]
    KilometersPerHour,
    MetersPerSecond,
    MilesPerHour,
    Knots,
}

impl SpeedUnit {
    pub fn convert(self, kilometers_per_hour: f64) -> f64 {
        match self {
            SpeedUnit::KilometersPerHour => kilometers_per_hour,
            SpeedUnit::MetersPerSecond => kilometers_per_hour / 3.6,
            SpeedUnit::MilesPerHour => kilometers_per_hour / KM_PER_MILE,
            SpeedUnit::Knots => kilometers_per_hour / KM_PER_NAUTICAL_MILE,
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            SpeedUnit::KilometersPerHour => "km/h",
            SpeedUnit::MetersPerSecond => "m/s",
            SpeedUnit::MilesPerHour => "mph",
            SpeedUnit::Knots => "kn",
        }
    }

    pub fn parse(name: &str) -> Option<SpeedUnit> {
        match name.trim().to_ascii_lowercase().as_str() {
            "km/h" | "kmh" | "kph" => Some(SpeedUnit::KilometersPerHour),
            "m/s" | "mps" => Some(SpeedUnit::MetersPerSecond),
            "mph" => Some(SpeedUnit::MilesPerHour),
            "kn" | "kt" | "knots" => Some(SpeedUnit::Knots),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureUnit {
    #[default]
    Bar,
    Psi,
    Kilopascal,
}

impl PressureUnit {
    pub fn convert(self, bar: f64) -> f64 {
        match self {
            PressureUnit::Bar => bar,
            PressureUnit::Psi => bar * PSI_PER_BAR,
            PressureUnit::Kilopascal => bar * 100.0,
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            PressureUnit::Bar => "bar",
            PressureUnit::Psi => "psi",
            PressureUnit::Kilopascal => "kPa",
        }
    }

    pub fn parse(name: &str) -> Option<PressureUnit> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bar" => Some(PressureUnit::Bar),
            "psi" => Some(PressureUnit::Psi),
            "kpa" => Some(PressureUnit::Kilopascal),
            _ => None,
        }
    }
}

pub fn convert_distance(kilometers: f64, unit: DistanceUnit) -> f64 {
    unit.convert(kilometers)
}

pub fn convert_speed(kilometers_per_hour: f64, unit: SpeedUnit) -> f64 {
    unit.convert(kilometers_per_hour)
}

pub fn convert_pressure(bar: f64, unit: PressureUnit) -> f64 {
    unit.convert(bar)
}
