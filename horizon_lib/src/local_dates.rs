use crate::dates::Date;
use crate::durations::Duration;
use crate::errors::{Error, Result, INFINITE_DATE};
use crate::finite_local_dates::FiniteLocalDate;
use crate::formatters::{self, DATE_DISPLAY, NOT_AVAILABLE};
use chrono::{Month, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::str::FromStr;

/// A date which might be infinitely far in the future.
///
/// The infinite date is later than every finite date, and equal only to
/// itself.  Arithmetic on it always gives the infinite date back, so code
/// that computes "start + duration" or "end + 1 month" does not need to
/// special-case open-ended periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalDate {
    Finite(FiniteLocalDate),
    Infinite,
}

impl LocalDate {
    #[must_use]
    pub const fn infinite() -> Self {
        LocalDate::Infinite
    }

    #[must_use]
    pub fn today() -> FiniteLocalDate {
        FiniteLocalDate::today()
    }

    pub fn on(year: i32, month: u32, day: u32) -> Result<FiniteLocalDate> {
        FiniteLocalDate::on(year, month, day)
    }

    pub fn on_month(
        year: i32,
        month: Month,
        day: u32,
    ) -> Result<FiniteLocalDate> {
        FiniteLocalDate::on_month(year, month, day)
    }

    #[must_use]
    pub fn on_date(instant: NaiveDateTime) -> FiniteLocalDate {
        FiniteLocalDate::on_date(instant)
    }

    #[must_use]
    pub fn days_after_today(days: i64) -> FiniteLocalDate {
        FiniteLocalDate::days_after_today(days)
    }

    #[must_use]
    pub fn days_before_today(days: i64) -> FiniteLocalDate {
        FiniteLocalDate::days_before_today(days)
    }

    #[must_use]
    pub fn months_after_today(months: i32) -> FiniteLocalDate {
        FiniteLocalDate::months_after_today(months)
    }

    #[must_use]
    pub fn parse_date<'a>(
        text: impl Into<Option<&'a str>>,
        pattern: &str,
    ) -> Option<FiniteLocalDate> {
        FiniteLocalDate::parse_date(text, pattern)
    }

    #[must_use]
    pub fn plus_days(&self, days: i64) -> Self {
        self.map(|d| d.plus_days(days))
    }

    #[must_use]
    pub fn minus_days(&self, days: i64) -> Self {
        self.map(|d| d.minus_days(days))
    }

    #[must_use]
    pub fn plus_months(&self, months: i32) -> Self {
        self.map(|d| d.plus_months(months))
    }

    #[must_use]
    pub fn minus_months(&self, months: i32) -> Self {
        self.map(|d| d.minus_months(months))
    }

    /// See [`FiniteLocalDate::plus_duration`]
    pub fn plus_duration(&self, duration: Duration) -> Result<Self> {
        match self {
            LocalDate::Finite(d) => d.plus_duration(duration),
            LocalDate::Infinite => Ok(LocalDate::Infinite),
        }
    }

    fn map(&self, f: impl FnOnce(&FiniteLocalDate) -> FiniteLocalDate) -> Self {
        match self {
            LocalDate::Finite(d) => LocalDate::Finite(f(d)),
            LocalDate::Infinite => LocalDate::Infinite,
        }
    }

    #[must_use]
    pub fn is_after(&self, other: impl Into<LocalDate>) -> bool {
        *self > other.into()
    }

    #[must_use]
    pub fn is_before(&self, other: impl Into<LocalDate>) -> bool {
        *self < other.into()
    }

    #[must_use]
    pub fn is_on_or_after(&self, other: impl Into<LocalDate>) -> bool {
        *self >= other.into()
    }

    #[must_use]
    pub fn is_on_or_before(&self, other: impl Into<LocalDate>) -> bool {
        *self <= other.into()
    }

    /// Whether self is in the closed range `[start, end]`.
    #[must_use]
    pub fn is_between(
        &self,
        start: impl Into<LocalDate>,
        end: impl Into<LocalDate>,
    ) -> bool {
        self.is_on_or_after(start) && self.is_on_or_before(end)
    }

    /// The number of days from self to other.
    /// This is infinite when other is infinite (even from the infinite
    /// date), and an error when other is earlier than self.
    pub fn duration_until(&self, other: impl Into<LocalDate>) -> Result<Duration> {
        match (self, other.into()) {
            (_, LocalDate::Infinite) => Ok(Duration::infinite()),
            (LocalDate::Infinite, LocalDate::Finite(_)) => {
                Err(Error::InvalidArgument(
                    "cannot get duration to earlier date".to_string(),
                ))
            }
            (LocalDate::Finite(start), LocalDate::Finite(end)) => {
                let days = start.days_until(&end);
                if days < 0 {
                    Err(Error::InvalidArgument(format!(
                        "cannot get duration to earlier date ({end} is before {start})"
                    )))
                } else {
                    Duration::of_days(days)
                }
            }
        }
    }

    /// The infinite date stays infinite, and is always in the future.
    #[must_use]
    pub fn to_future_date(&self) -> Self {
        self.map(FiniteLocalDate::to_future_date)
    }

    pub fn to_finite_local_date(&self) -> Result<FiniteLocalDate> {
        match self {
            LocalDate::Finite(d) => Ok(*d),
            LocalDate::Infinite => Err(Error::IllegalState(INFINITE_DATE)),
        }
    }

    pub fn get_date(&self) -> Result<NaiveDateTime> {
        self.to_finite_local_date().map(|d| d.get_date())
    }

    pub fn to_calendar(&self) -> Result<NaiveDate> {
        self.to_finite_local_date().map(|d| d.to_calendar())
    }
}

impl Date for LocalDate {
    fn calendar_date(&self) -> Option<NaiveDate> {
        match self {
            LocalDate::Finite(d) => Some(d.to_calendar()),
            LocalDate::Infinite => None,
        }
    }

    fn is_after_now(&self) -> bool {
        match self {
            LocalDate::Finite(d) => d.is_after_now(),
            LocalDate::Infinite => true,
        }
    }

    fn is_before_now(&self) -> bool {
        match self {
            LocalDate::Finite(d) => d.is_before_now(),
            LocalDate::Infinite => false,
        }
    }

    /// The infinite date displays as "N/A" whatever the pattern.
    fn format(&self, pattern: &str) -> Result<String> {
        match self {
            LocalDate::Finite(d) => d.format(pattern),
            LocalDate::Infinite => Ok(NOT_AVAILABLE.to_string()),
        }
    }
}

impl Ord for LocalDate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LocalDate::Finite(a), LocalDate::Finite(b)) => a.cmp(b),
            (LocalDate::Finite(_), LocalDate::Infinite) => Ordering::Less,
            (LocalDate::Infinite, LocalDate::Finite(_)) => Ordering::Greater,
            (LocalDate::Infinite, LocalDate::Infinite) => Ordering::Equal,
        }
    }
}

impl PartialOrd for LocalDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<FiniteLocalDate> for LocalDate {
    fn from(date: FiniteLocalDate) -> Self {
        LocalDate::Finite(date)
    }
}

impl From<&FiniteLocalDate> for LocalDate {
    fn from(date: &FiniteLocalDate) -> Self {
        LocalDate::Finite(*date)
    }
}

impl From<&LocalDate> for LocalDate {
    fn from(date: &LocalDate) -> Self {
        *date
    }
}

impl std::fmt::Display for LocalDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalDate::Finite(d) => write!(f, "{d}"),
            LocalDate::Infinite => write!(f, "infinite"),
        }
    }
}

impl FromStr for LocalDate {
    type Err = Error;

    /// Accepts what `to_string()` produces.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("infinite") {
            return Ok(LocalDate::Infinite);
        }
        formatters::parse_date(s, DATE_DISPLAY)
            .map(|d| LocalDate::Finite(d.into()))
            .ok_or_else(|| Error::Parse(s.to_string()))
    }
}
