//! Locale and unit formatting services for Tabula tables.
//!
//! The crate is the leaf of the workspace and knows nothing about fields or
//! rows. It provides:
//! - [`locale`] helpers for decimal/thousands separators and date patterns.
//! - [`units`] conversions from the canonical units (kilometers, km/h, bar)
//!   into a user's preferred unit, plus the display suffix for each unit.
//! - [`duration`] rendering of second counts as `HH:MM` / `{d}d HH:MM`.
//! - [`timezone`] lookup from a closed set of zones to IANA names and offsets.

pub mod duration;
pub mod locale;
pub mod timezone;
pub mod units;

pub use duration::{duration_minutes, format_duration};
pub use locale::{format_integer, format_number, format_plain, Locale};
pub use timezone::Timezone;
pub use units::{
    convert_distance, convert_pressure, convert_speed, DistanceUnit, PressureUnit, SpeedUnit,
};
