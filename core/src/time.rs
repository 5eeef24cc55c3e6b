use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use anyhow::{anyhow, Result};

use crate::config::MonthKeyStyle;

pub fn parse_duration(input: &str) -> Result<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty duration string"));
    }

    // Bare numbers are minutes, matching the wire format
    if let Ok(minutes) = input.parse::<i64>() {
        return Duration::try_minutes(minutes).ok_or_else(|| anyhow!("Duration out of range"));
    }

    let (split, unit) = input
        .char_indices()
        .last()
        .ok_or_else(|| anyhow!("Empty duration string"))?;
    let num_str = &input[..split];

    let num: i64 = num_str.parse().map_err(|_| anyhow!("Invalid duration number"))?;

    let duration = match unit.to_ascii_lowercase() {
        'm' => Duration::try_minutes(num),
        'h' => Duration::try_hours(num),
        _ => return Err(anyhow!("Unknown duration unit: {}", unit)),
    };
    duration.ok_or_else(|| anyhow!("Duration out of range"))
}

/// Resolves a training date to a calendar date.
///
/// Timestamps with an offset are converted to the local zone first; plain
/// dates and naive date-times are taken as-is.
pub fn parse_training_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Local).date_naive());
    }

    Err(anyhow!("Could not parse date: {}", input))
}

pub fn year_key(date: NaiveDate) -> String {
    format!("{:04}", date.year())
}

pub fn month_key(date: NaiveDate, style: MonthKeyStyle) -> String {
    match style {
        MonthKeyStyle::Name => date.format("%B").to_string().to_uppercase(),
        MonthKeyStyle::Number => date.month().to_string(),
    }
}
