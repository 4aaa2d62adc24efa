//! Display formatting for appointment times, in the viewer's timezone.

use chrono::{DateTime, Local, Utc};
use shared_types::CalendarDate;

/// "Sat, Nov 1, 2025"
pub fn format_local_date(start_at: DateTime<Utc>) -> String {
    start_at
        .with_timezone(&Local)
        .format("%a, %b %-d, %Y")
        .to_string()
}

/// "2:00 PM"
pub fn format_local_time(start_at: DateTime<Utc>) -> String {
    start_at.with_timezone(&Local).format("%-I:%M %p").to_string()
}

/// Offset of the viewer's timezone, e.g. "UTC+01:00".
pub fn local_offset_label(start_at: DateTime<Utc>) -> String {
    start_at.with_timezone(&Local).format("UTC%:z").to_string()
}

pub fn local_calendar_date(start_at: DateTime<Utc>) -> CalendarDate {
    CalendarDate::from(start_at.with_timezone(&Local).date_naive())
}

/// "Monday, November 3"
pub fn format_calendar_date(date: CalendarDate) -> String {
    date.naive().format("%A, %B %-d").to_string()
}
