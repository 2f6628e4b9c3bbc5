//! Numeric conversions used by the delta engine: decibel gain math and
//! flexible duration parsing.

use std::time::Duration;

use thiserror::Error;

/// A duration string that matches none of the accepted shapes.
#[derive(Debug, Error)]
#[error("invalid duration format: '{0}'")]
pub struct DurationParseError(pub String);

/// Given two linear gain fractions, compute the difference in decibels.
///
/// Both inputs are clamped to `[0.001, 1.0]` before the ratio is taken:
/// 20 * log10(0.001) = -60 dB is the practical silence floor (a user setting
/// the volume to 0 wants a mute, not negative infinity), and 1.0 is full
/// scale. The result is therefore bounded to [-60, 60] dB.
pub fn volume_delta_db(old: f64, new: f64) -> f64 {
    const FLOOR: f64 = 1.0e-3;
    const FULL_SCALE: f64 = 1.0;

    let clamped_old = old.clamp(FLOOR, FULL_SCALE);
    let clamped_new = new.clamp(FLOOR, FULL_SCALE);

    20.0 * (clamped_new / clamped_old).log10()
}

/// Parse a bare number of seconds, a `mm:ss` or a `hh:mm:ss` string.
///
/// Leading zeros and single-digit components are accepted in every position.
/// A colon-separated component that fails to parse counts as 0 rather than
/// failing the whole string; anything with zero colons that is not a number,
/// or with more than two colons, is rejected.
pub fn parse_duration(text: &str) -> Result<Duration, DurationParseError> {
    if let Ok(secs) = text.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let parts: Vec<&str> = text.split(':').collect();
    match parts.len() {
        2 => {
            let min = parts[0].parse::<u64>().unwrap_or(0);
            let sec = parts[1].parse::<u64>().unwrap_or(0);
            Ok(Duration::from_secs(min * 60 + sec))
        }
        3 => {
            let hr = parts[0].parse::<u64>().unwrap_or(0);
            let min = parts[1].parse::<u64>().unwrap_or(0);
            let sec = parts[2].parse::<u64>().unwrap_or(0);
            Ok(Duration::from_secs(hr * 3600 + min * 60 + sec))
        }
        _ => Err(DurationParseError(text.to_string())),
    }
}
