//! Conversion between instants and the fixed-format strings held by form fields.
//!
//! Records carry `DateTime<Utc>` values at whatever precision the store
//! returned. Form fields carry strings in a fixed pattern, by default
//! [`DATE_TIME_FORMAT`] (`2025-08-21T08:26`), so editing happens at minute
//! precision. Every value is read and written in UTC.
//!
//! # Malformed input
//!
//! [`decode`] never fails: an unreadable string becomes `None` and a
//! `warn` event is emitted with the input and pattern. Callers that need
//! the cause use [`try_decode`], which returns [`Error::Temporal`].

use chrono::format::{Item, ParseErrorKind, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use std::fmt::{self, Write};

use crate::error::{Error, Result};

/// A chrono strftime pattern for form temporal fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeFormat(&'static str);

/// Minute-precision date-time, the pattern used by `datetime-local` inputs.
pub const DATE_TIME_FORMAT: DateTimeFormat = DateTimeFormat("%Y-%m-%dT%H:%M");

/// Day-precision date.
pub const DATE_FORMAT: DateTimeFormat = DateTimeFormat("%Y-%m-%d");

impl DateTimeFormat {
    /// Creates a format from a strftime pattern, rejecting unknown specifiers.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelfdesk_core::DateTimeFormat;
    ///
    /// assert!(DateTimeFormat::try_new("%d/%m/%Y %H:%M").is_ok());
    /// assert!(DateTimeFormat::try_new("%Q").is_err());
    /// ```
    pub fn try_new(pattern: &'static str) -> Result<Self> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(Error::config(format!(
                "invalid date-time pattern '{pattern}'"
            )));
        }
        Ok(Self(pattern))
    }

    /// Returns the strftime pattern.
    pub fn pattern(&self) -> &'static str {
        self.0
    }
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        DATE_TIME_FORMAT
    }
}

impl fmt::Display for DateTimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Reads a form string as an instant.
///
/// Returns `None` for absent, empty, or whitespace-only input, and for input
/// that does not match `format` (logged at `warn`). Patterns without a time
/// component decode to midnight UTC.
pub fn decode(raw: Option<&str>, format: DateTimeFormat) -> Option<DateTime<Utc>> {
    match try_decode(raw, format) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                input = raw.unwrap_or_default(),
                format = %format,
                error = %err,
                "Unreadable date-time in form, treating as empty"
            );
            None
        }
    }
}

/// Reads a form string as an instant, reporting malformed input.
pub fn try_decode(raw: Option<&str>, format: DateTimeFormat) -> Result<Option<DateTime<Utc>>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let parsed = match NaiveDateTime::parse_from_str(raw, format.pattern()) {
        Ok(naive) => Ok(naive),
        Err(err) if err.kind() == ParseErrorKind::NotEnough => {
            NaiveDate::parse_from_str(raw, format.pattern())
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        }
        Err(err) => Err(err),
    };

    parsed
        .map(|naive| Some(naive.and_utc()))
        .map_err(|source| Error::Temporal {
            input: raw.to_string(),
            format: format.pattern(),
            source,
        })
}

/// Writes an instant as a form string.
///
/// Returns `None` when `value` is `None`. Precision finer than `format`
/// is dropped.
pub fn encode(value: Option<&DateTime<Utc>>, format: DateTimeFormat) -> Option<String> {
    let value = value?;
    let mut out = String::new();
    match write!(out, "{}", value.format(format.pattern())) {
        Ok(()) => Some(out),
        Err(_) => {
            tracing::warn!(format = %format, "Date-time pattern could not be rendered");
            None
        }
    }
}

/// Drops seconds and sub-second precision.
pub fn truncate_to_minute(value: DateTime<Utc>) -> DateTime<Utc> {
    value
        .with_nanosecond(0)
        .and_then(|v| v.with_second(0))
        .unwrap_or(value)
}
