use std::fmt::{self, Display, Formatter};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::DomainError;

/// RFC3339 timestamp guaranteed to be UTC.
///
/// Serialized as an RFC3339 string with a `Z` suffix. Deserialization is lenient
/// about what the backend sends back: any RFC3339 offset (normalized to UTC), a
/// naive `YYYY-MM-DDTHH:MM[:SS]` datetime (read as UTC), or integer epoch
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Strict parse: RFC3339 with a UTC offset only.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let parsed = OffsetDateTime::parse(input, &Rfc3339).map_err(|_| {
            DomainError::TimestampNotUtc {
                value: input.to_owned(),
            }
        })?;

        if parsed.offset() != UtcOffset::UTC {
            return Err(DomainError::TimestampNotUtc {
                value: input.to_owned(),
            });
        }

        Ok(Self(parsed))
    }

    /// Parses the forms a date field may carry: RFC3339 with any offset, a bare
    /// calendar date (UTC midnight), or a naive date-time (UTC).
    pub fn parse_flexible(input: &str) -> Option<Self> {
        let trimmed = input.trim();

        if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            return Some(Self::from_offset_datetime(parsed));
        }

        if let Ok(date) = Date::parse(trimmed, format_description!("[year]-[month]-[day]")) {
            return Some(Self(date.midnight().assume_utc()));
        }

        let naive_formats = [
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
            format_description!("[year]-[month]-[day]T[hour]:[minute]"),
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
            format_description!("[year]-[month]-[day] [hour]:[minute]"),
        ];
        naive_formats.iter().find_map(|format| {
            PrimitiveDateTime::parse(trimmed, *format)
                .ok()
                .map(|value| Self(value.assume_utc()))
        })
    }

    /// Builds a UTC timestamp from a calendar date and a wall-clock time.
    pub fn from_date_time(date: Date, time: Time) -> Self {
        Self(PrimitiveDateTime::new(date, time).assume_utc())
    }

    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        let nanos = i128::from(millis) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).ok().map(Self)
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self(value.to_offset(UtcOffset::UTC))
    }

    pub fn date(self) -> Date {
        self.0.date()
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.0.unix_timestamp().to_string())
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(UtcDateTimeVisitor)
    }
}

struct UtcDateTimeVisitor;

impl Visitor<'_> for UtcDateTimeVisitor {
    type Value = UtcDateTime;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC3339 timestamp or epoch milliseconds")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        UtcDateTime::parse_flexible(value)
            .ok_or_else(|| E::custom(format!("invalid timestamp '{value}'")))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        UtcDateTime::from_unix_millis(value)
            .ok_or_else(|| E::custom(format!("epoch millis out of range: {value}")))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let value = i64::try_from(value)
            .map_err(|_| E::custom(format!("epoch millis out of range: {value}")))?;
        self.visit_i64(value)
    }
}
