//! Wall-clock helpers.

use chrono::{DateTime, Local, TimeZone};

/// Format a point in time as `HH:MM`, the label shown next to chat messages
/// and room creation times.
pub fn format_hour_minute<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%H:%M").to_string()
}

/// Current local time as `HH:MM`.
pub fn current_hour_minute() -> String {
    format_hour_minute(&Local::now())
}
