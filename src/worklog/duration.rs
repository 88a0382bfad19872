//! Duration strings such as `2h30m`, `1.5h`, `45m` or a bare `90` (minutes).

use crate::error::{Result, WorklogError};

pub const MIN_MINUTES: i64 = 1;
pub const MAX_MINUTES: i64 = 24 * 60;

/// Parses a duration into whole minutes within `[MIN_MINUTES, MAX_MINUTES]`.
pub fn parse_duration(input: &str) -> Result<i64> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if compact.is_empty() {
        return Err(WorklogError::InvalidDuration("empty duration".into()));
    }

    let minutes = if compact.chars().all(|c| c.is_ascii_digit()) {
        compact
            .parse::<f64>()
            .map_err(|_| invalid(input))?
    } else {
        parse_units(&compact).ok_or_else(|| invalid(input))?
    };

    let minutes = minutes.round() as i64;
    if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
        return Err(WorklogError::InvalidDuration(format!(
            "{} is outside 1m..24h",
            input.trim()
        )));
    }
    Ok(minutes)
}

// Sequence of <number><unit> pairs, each unit at most once, hours before minutes.
fn parse_units(s: &str) -> Option<f64> {
    let mut total = 0.0;
    let mut number = String::new();
    let mut seen_hours = false;
    let mut seen_minutes = false;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }
        let value: f64 = number.parse().ok()?;
        number.clear();
        match c {
            'h' if !seen_hours && !seen_minutes => {
                seen_hours = true;
                total += value * 60.0;
            }
            'm' if !seen_minutes => {
                seen_minutes = true;
                // accept "min" and "mins"
                if chars.peek() == Some(&'i') {
                    chars.next();
                    if chars.next() != Some('n') {
                        return None;
                    }
                    if chars.peek() == Some(&'s') {
                        chars.next();
                    }
                }
                total += value;
            }
            _ => return None,
        }
    }

    if !number.is_empty() {
        return None;
    }
    Some(total)
}

fn invalid(input: &str) -> WorklogError {
    WorklogError::InvalidDuration(format!("could not parse '{}'", input.trim()))
}

/// `150` → `2h 30m`
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let abs = minutes.abs();
    let (hours, mins) = (abs / 60, abs % 60);
    match (hours, mins) {
        (0, m) => format!("{}{}m", sign, m),
        (h, 0) => format!("{}{}h", sign, h),
        (h, m) => format!("{}{}h {}m", sign, h, m),
    }
}
