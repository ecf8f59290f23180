//! # Duration Validation
//!
//! Handles parsing and formatting Kubernetes (Go-style) duration strings.

use anyhow::Result;
use chrono::TimeDelta;
use regex::Regex;
use std::sync::LazyLock;

// One <number><unit> component, e.g. "1.5h" or "30s"
static COMPONENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<number>\d+(?:\.\d*)?|\.\d+)(?P<unit>ns|us|µs|μs|ms|s|m|h)")
        .expect("duration regex is a valid literal")
});

const NANOS_PER_MICRO: i128 = 1_000;
const NANOS_PER_MILLI: i128 = 1_000_000;
const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;

fn unit_nanos(unit: &str) -> i128 {
    match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => NANOS_PER_MICRO,
        "ms" => NANOS_PER_MILLI,
        "s" => NANOS_PER_SECOND,
        "m" => NANOS_PER_MINUTE,
        _ => NANOS_PER_HOUR,
    }
}

/// Parse a Go duration string into a [`TimeDelta`]
///
/// Supports sequences of decimal numbers with units, with an optional sign:
/// "24h", "1h30m", "-5m", "1.5h", "300ms", "0".
///
/// # Errors
///
/// Returns an error if the string is empty, contains an unknown unit or
/// trailing garbage, or overflows.
pub fn parse_go_duration(duration_str: &str) -> Result<TimeDelta> {
    let trimmed = duration_str.trim();
    if trimmed.is_empty() {
        return Err(anyhow::anyhow!("Duration string cannot be empty"));
    }

    let (negative, body) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if body == "0" {
        return Ok(TimeDelta::zero());
    }
    if body.is_empty() {
        return Err(anyhow::anyhow!("Invalid duration '{trimmed}'"));
    }

    let mut total: i128 = 0;
    let mut consumed = 0;
    for captures in COMPONENT_REGEX.captures_iter(body) {
        let whole = captures
            .get(0)
            .ok_or_else(|| anyhow::anyhow!("Failed to match duration component in '{trimmed}'"))?;
        if whole.start() != consumed {
            return Err(anyhow::anyhow!(
                "Invalid duration '{trimmed}'. Expected format: <number><unit>[<number><unit>...] (e.g., '24h', '1h30m')"
            ));
        }
        consumed = whole.end();

        let number = captures
            .name("number")
            .ok_or_else(|| anyhow::anyhow!("Failed to extract number from duration '{trimmed}'"))?
            .as_str();
        let unit = captures
            .name("unit")
            .ok_or_else(|| anyhow::anyhow!("Failed to extract unit from duration '{trimmed}'"))?
            .as_str();

        total = total
            .checked_add(component_nanos(number, unit_nanos(unit)).ok_or_else(|| {
                anyhow::anyhow!("Duration '{trimmed}' is out of range")
            })?)
            .ok_or_else(|| anyhow::anyhow!("Duration '{trimmed}' is out of range"))?;
    }

    if consumed != body.len() {
        return Err(anyhow::anyhow!(
            "Invalid duration '{trimmed}'. Expected format: <number><unit>[<number><unit>...] (e.g., '24h', '1h30m')"
        ));
    }

    if negative {
        total = -total;
    }
    let nanos = i64::try_from(total)
        .map_err(|e| anyhow::anyhow!("Duration '{trimmed}' is out of range: {e}"))?;
    Ok(TimeDelta::nanoseconds(nanos))
}

// "1.5" with unit hour -> 1.5 * NANOS_PER_HOUR, exact for up to 9 fraction digits
fn component_nanos(number: &str, unit: i128) -> Option<i128> {
    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    let int_value: i128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };
    let mut nanos = int_value.checked_mul(unit)?;

    let mut scale = unit;
    for digit in frac_part.chars().take(18) {
        scale /= 10;
        let d = i128::from(digit.to_digit(10)?);
        nanos = nanos.checked_add(d * scale)?;
    }
    Some(nanos)
}

/// Render a [`TimeDelta`] the way Go prints durations ("24h0m0s", "1m30s", "500ms")
#[must_use]
pub fn format_go_duration(delta: TimeDelta) -> String {
    let total = i128::from(delta.num_nanoseconds().unwrap_or(i64::MAX));
    if total == 0 {
        return "0s".to_string();
    }
    let sign = if total < 0 { "-" } else { "" };
    let abs = total.abs();

    if abs < NANOS_PER_SECOND {
        let (value, unit) = if abs % NANOS_PER_MILLI == 0 {
            (abs / NANOS_PER_MILLI, "ms")
        } else if abs % NANOS_PER_MICRO == 0 {
            (abs / NANOS_PER_MICRO, "µs")
        } else {
            (abs, "ns")
        };
        return format!("{sign}{value}{unit}");
    }

    let hours = abs / NANOS_PER_HOUR;
    let minutes = (abs % NANOS_PER_HOUR) / NANOS_PER_MINUTE;
    let seconds = (abs % NANOS_PER_MINUTE) / NANOS_PER_SECOND;
    let fraction = abs % NANOS_PER_SECOND;

    let mut seconds_str = seconds.to_string();
    if fraction != 0 {
        let digits = format!("{fraction:09}");
        seconds_str.push('.');
        seconds_str.push_str(digits.trim_end_matches('0'));
    }

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{seconds_str}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{seconds_str}s")
    } else {
        format!("{sign}{seconds_str}s")
    }
}
