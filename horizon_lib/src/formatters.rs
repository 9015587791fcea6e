use crate::errors::{Error, Result};
use chrono::format::ParseErrorKind;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::{Display, Write};

/// What an infinite date displays as when formatted with any pattern.
pub const NOT_AVAILABLE: &str = "N/A";

/// Pattern used to display dates, e.g. "Thu Oct 25 2001".
pub const DATE_DISPLAY: &str = "%a %b %d %Y";

/// Pattern used to display date-times, e.g. "Thu Oct 25 2001 23:01:01".
pub const DATE_TIME_DISPLAY: &str = "%a %b %d %Y %H:%M:%S";

/// Patterns use chrono's strftime syntax.  A pattern that chrono rejects,
/// or that refers to fields the value doesn't have (e.g. an hour on a plain
/// date), is an error.
pub fn format_date(date: &NaiveDate, pattern: &str) -> Result<String> {
    push_formatted(date.format(pattern), pattern)
}

pub fn format_date_time(
    date_time: &NaiveDateTime,
    pattern: &str,
) -> Result<String> {
    push_formatted(date_time.format(pattern), pattern)
}

fn push_formatted(value: impl Display, pattern: &str) -> Result<String> {
    let mut into = String::new();
    match write!(into, "{value}") {
        Ok(()) => Ok(into),
        Err(_) => {
            log::warn!("invalid format pattern {pattern:?}");
            Err(Error::InvalidArgument(format!(
                "invalid format pattern {pattern:?}"
            )))
        }
    }
}

/// Parse a date.
/// Empty or missing text, and anything the pattern doesn't strictly
/// match, gives None.  Out-of-range fields never roll over into the next
/// month or year.
#[must_use]
pub fn parse_date<'a>(
    text: impl Into<Option<&'a str>>,
    pattern: &str,
) -> Option<NaiveDate> {
    let text = text.into().filter(|t| !t.is_empty())?;
    match NaiveDate::parse_from_str(text, pattern) {
        Ok(date) => Some(date),
        Err(e) => {
            log::debug!("cannot parse {text:?} with {pattern:?}: {e}");
            None
        }
    }
}

/// Parse a date-time, with the same rules as `parse_date`.
/// A pattern with no time fields gives midnight.
#[must_use]
pub fn parse_date_time<'a>(
    text: impl Into<Option<&'a str>>,
    pattern: &str,
) -> Option<NaiveDateTime> {
    let text = text.into().filter(|t| !t.is_empty())?;
    match NaiveDateTime::parse_from_str(text, pattern) {
        Ok(date_time) => Some(date_time),
        Err(e) if e.kind() == ParseErrorKind::NotEnough => {
            parse_date(text, pattern).map(|d| d.and_time(chrono::NaiveTime::MIN))
        }
        Err(e) => {
            log::debug!("cannot parse {text:?} with {pattern:?}: {e}");
            None
        }
    }
}
