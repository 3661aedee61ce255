//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{DateTime, Local};

/// Timestamp layout used across the admin pages.
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(Local::now().year())
}

/// Formats an RFC 3339 timestamp in the server's local time zone.
///
/// Values that do not parse are shown as received.
///
/// Usage in templates: `{{ entry.created_at|local_time }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn local_time(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_local(&value.to_string()))
}

/// Formats one decimal place, as the metric tiles show averages.
///
/// Usage in templates: `{{ metrics.average_goals|one_decimal }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn one_decimal(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(raw
        .parse::<f64>()
        .map_or(raw, |number| format!("{number:.1}")))
}

fn format_local(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_string(),
        |parsed| {
            parsed
                .with_timezone(&Local)
                .format(LOCAL_TIME_FORMAT)
                .to_string()
        },
    )
}
