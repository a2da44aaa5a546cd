//! Time helpers used by the transport bar and track rows

use crate::error::{CoreError, Result};

/// Format seconds as `m:ss`
///
/// Fractions are truncated. Minutes are not wrapped into hours, so an hour
/// reads `60:00`. Negative or non-finite input formats as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Parse a catalog duration such as `"3:58"` into seconds
pub fn parse_duration(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let (minutes, seconds) = trimmed
        .split_once(':')
        .ok_or_else(|| CoreError::invalid_duration(input))?;

    // Digits only: `u64::from_str` would take a leading `+`
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(minutes) || !all_digits(seconds) || seconds.len() != 2 {
        return Err(CoreError::invalid_duration(input));
    }

    let minutes: u64 = minutes
        .parse()
        .map_err(|_| CoreError::invalid_duration(input))?;
    let seconds: u64 = seconds
        .parse()
        .map_err(|_| CoreError::invalid_duration(input))?;
    if seconds >= 60 {
        return Err(CoreError::invalid_duration(input));
    }

    minutes
        .checked_mul(60)
        .and_then(|total| total.checked_add(seconds))
        .map(|total| total as f64)
        .ok_or_else(|| CoreError::invalid_duration(input))
}
