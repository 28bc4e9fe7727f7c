use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

use crate::UtcDateTime;

/// A date field as the user entered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnteredDate {
    /// The instant the value denotes, normalized to UTC.
    pub instant: UtcDateTime,
    /// The calendar day as written, before any offset is applied.
    pub day: Date,
}

/// Parses a date field. An RFC3339 value keeps the day of its own offset;
/// bare dates and naive date-times are read as UTC.
pub fn parse_entered_date(input: &str) -> Option<EnteredDate> {
    if let Ok(parsed) = OffsetDateTime::parse(input.trim(), &Rfc3339) {
        return Some(EnteredDate {
            instant: UtcDateTime::from_offset_datetime(parsed),
            day: parsed.date(),
        });
    }

    UtcDateTime::parse_flexible(input).map(|instant| EnteredDate {
        instant,
        day: instant.date(),
    })
}

/// Parses a wall-clock time as entered in a form: `HH:MM` or `HH:MM:SS`.
pub fn parse_wall_time(input: &str) -> Option<Time> {
    let trimmed = input.trim();
    Time::parse(trimmed, format_description!("[hour]:[minute]"))
        .or_else(|_| Time::parse(trimmed, format_description!("[hour]:[minute]:[second]")))
        .ok()
}

/// Merges the separate date and time fields into the single timestamp the
/// backend expects: the entered calendar day at `time`, in UTC.
pub fn combine_date_and_time(day: Date, time: Time) -> UtcDateTime {
    UtcDateTime::from_date_time(day, time)
}
