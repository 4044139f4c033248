use std::fmt::Display;

use chrono::{TimeZone, Utc};

use crate::types::{parse_timestamp, Item};

/// Label shown in the size column for directories.
pub const NOT_APPLICABLE: &str = "N/A";

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

// Format bytes using binary units, one decimal place
pub fn format_bytes(n: u64) -> String {
    if n == 0 {
        return "0 B".to_string();
    }
    let mut v = n as f64;
    let mut i = 0usize;
    while v >= 1024.0 && i < UNITS.len() - 1 {
        v /= 1024.0;
        i += 1;
    }
    format!("{:.1} {}", v, UNITS[i])
}

pub fn format_size(item: &Item) -> String {
    if item.is_dir() {
        return NOT_APPLICABLE.to_string();
    }
    format_bytes(item.size.unwrap_or(0))
}

/// `"Mon DD, YYYY"`, or `"Mon DD, YYYY HH:MM:SS"` with `show_time`, rendered in `tz`.
/// Absent or unparseable timestamps render as an empty string.
pub fn format_date_in<Tz>(timestamp: Option<&str>, show_time: bool, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(instant) = timestamp.and_then(parse_timestamp) else {
        return String::new();
    };
    let local = instant.with_timezone(tz);
    if show_time {
        local.format("%b %d, %Y %H:%M:%S").to_string()
    } else {
        local.format("%b %d, %Y").to_string()
    }
}

pub fn format_date(timestamp: Option<&str>, show_time: bool) -> String {
    format_date_in(timestamp, show_time, &Utc)
}
