//! Offline unit conversion.

use std::io::Write;

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::constants;

const FEET_PER_METER: f64 = 3.28084;
const POUNDS_PER_KILOGRAM: f64 = 2.20462;

/// Converts `value` between the supported unit pairs (case-insensitive).
///
/// Returns `None` for an unsupported pair.
#[must_use]
pub fn convert_units(value: f64, from: &str, to: &str) -> Option<f64> {
    let result = match (from.to_lowercase().as_str(), to.to_lowercase().as_str()) {
        ("m", "ft") => value * FEET_PER_METER,
        ("ft", "m") => value / FEET_PER_METER,
        ("kg", "lb") => value * POUNDS_PER_KILOGRAM,
        ("lb", "kg") => value / POUNDS_PER_KILOGRAM,
        ("c", "f") => value * 9.0 / 5.0 + 32.0,
        ("f", "c") => (value - 32.0) * 5.0 / 9.0,
        _ => return None,
    };
    Some(result)
}

/// Prints `VALUE FROM = RESULT TO` with two decimals.
///
/// # Errors
///
/// Returns an error listing the supported pairs when the units are unknown.
pub fn unit_convert(out: &mut dyn Write, value: f64, from: &str, to: &str) -> Result<()> {
    let result = convert_units(value, from, to).ok_or_else(|| eyre!(constants::ERR_UNSUPPORTED_UNITS))?;
    writeln!(out, "{value} {from} = {result:.2} {to}")?;
    Ok(())
}
