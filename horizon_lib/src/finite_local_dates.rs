use crate::dates::Date;
use crate::durations::Duration;
use crate::errors::{Error, Result};
use crate::formatters::{self, DATE_DISPLAY};
use crate::local_dates::LocalDate;
use crate::times;
use chrono::{
    Days, Month, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta,
};

/// A concrete calendar date, without time of day.
///
/// All arithmetic returns a new date; the calendar engine (chrono) takes
/// care of month lengths, leap years and year boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiniteLocalDate(NaiveDate);

impl FiniteLocalDate {
    /// Today, as seen by the (possibly fixed) clock.
    #[must_use]
    pub fn today() -> Self {
        FiniteLocalDate(times::today())
    }

    /// Fails if the triple is not a real calendar date (e.g. February 30).
    pub fn on(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(FiniteLocalDate)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "not a calendar date: {year}-{month:02}-{day:02}"
                ))
            })
    }

    pub fn on_month(year: i32, month: Month, day: u32) -> Result<Self> {
        Self::on(year, month.number_from_month(), day)
    }

    /// The date part of an arbitrary point in time.
    #[must_use]
    pub fn on_date(instant: NaiveDateTime) -> Self {
        FiniteLocalDate(instant.date())
    }

    /// Negative values go backward.
    #[must_use]
    pub fn days_after_today(days: i64) -> Self {
        Self::today().plus_days(days)
    }

    /// Negative values go forward.
    #[must_use]
    pub fn days_before_today(days: i64) -> Self {
        Self::today().minus_days(days)
    }

    #[must_use]
    pub fn months_after_today(months: i32) -> Self {
        Self::today().plus_months(months)
    }

    /// None if the text is empty or missing, or doesn't match the pattern.
    #[must_use]
    pub fn parse_date<'a>(
        text: impl Into<Option<&'a str>>,
        pattern: &str,
    ) -> Option<Self> {
        formatters::parse_date(text, pattern).map(FiniteLocalDate)
    }

    /// The first instant of this date.
    #[must_use]
    pub fn get_date(&self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN)
    }

    /// The calendar engine's own value.
    #[must_use]
    pub fn to_calendar(&self) -> NaiveDate {
        self.0
    }

    /// # Panics
    ///
    /// If the result is outside of the range supported by chrono.
    #[must_use]
    pub fn plus_days(&self, days: i64) -> Self {
        FiniteLocalDate(self.0 + TimeDelta::days(days))
    }

    /// # Panics
    ///
    /// If the result is outside of the range supported by chrono.
    #[must_use]
    pub fn minus_days(&self, days: i64) -> Self {
        FiniteLocalDate(self.0 - TimeDelta::days(days))
    }

    /// The day of month is clamped to the length of the target month, so
    /// January 31st plus one month is the last day of February.
    ///
    /// # Panics
    ///
    /// If the result is outside of the range supported by chrono.
    #[must_use]
    pub fn plus_months(&self, months: i32) -> Self {
        let delta = Months::new(months.unsigned_abs());
        if months >= 0 {
            FiniteLocalDate(self.0 + delta)
        } else {
            FiniteLocalDate(self.0 - delta)
        }
    }

    /// # Panics
    ///
    /// If the result is outside of the range supported by chrono.
    #[must_use]
    pub fn minus_months(&self, months: i32) -> Self {
        let delta = Months::new(months.unsigned_abs());
        if months >= 0 {
            FiniteLocalDate(self.0 - delta)
        } else {
            FiniteLocalDate(self.0 + delta)
        }
    }

    /// An infinite duration leads to the infinite date.  Fails when the
    /// result is past the last date chrono can represent.
    pub fn plus_duration(&self, duration: Duration) -> Result<LocalDate> {
        let Some(days) = duration.finite_days() else {
            return Ok(LocalDate::Infinite);
        };
        u64::try_from(days)
            .ok()
            .and_then(|d| self.0.checked_add_days(Days::new(d)))
            .map(|d| LocalDate::Finite(FiniteLocalDate(d)))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "{self} plus {days} days is out of range"
                ))
            })
    }

    #[must_use]
    pub fn is_after(&self, other: impl Into<LocalDate>) -> bool {
        LocalDate::from(*self).is_after(other)
    }

    #[must_use]
    pub fn is_before(&self, other: impl Into<LocalDate>) -> bool {
        LocalDate::from(*self).is_before(other)
    }

    #[must_use]
    pub fn is_on_or_after(&self, other: impl Into<LocalDate>) -> bool {
        LocalDate::from(*self).is_on_or_after(other)
    }

    #[must_use]
    pub fn is_on_or_before(&self, other: impl Into<LocalDate>) -> bool {
        LocalDate::from(*self).is_on_or_before(other)
    }

    #[must_use]
    pub fn is_between(
        &self,
        start: impl Into<LocalDate>,
        end: impl Into<LocalDate>,
    ) -> bool {
        LocalDate::from(*self).is_between(start, end)
    }

    /// See [`LocalDate::duration_until`]
    pub fn duration_until(&self, other: impl Into<LocalDate>) -> Result<Duration> {
        LocalDate::from(*self).duration_until(other)
    }

    /// Number of days from self to other, negative if other is earlier.
    pub(crate) fn days_until(&self, other: &FiniteLocalDate) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// This date if it is after today, otherwise tomorrow.
    #[must_use]
    pub fn to_future_date(&self) -> Self {
        if self.is_after_now() {
            *self
        } else {
            Self::days_after_today(1)
        }
    }
}

impl Date for FiniteLocalDate {
    fn calendar_date(&self) -> Option<NaiveDate> {
        Some(self.0)
    }

    fn is_after_now(&self) -> bool {
        self.0 > times::today()
    }

    fn is_before_now(&self) -> bool {
        self.0 < times::today()
    }

    fn format(&self, pattern: &str) -> Result<String> {
        formatters::format_date(&self.0, pattern)
    }
}

impl From<NaiveDate> for FiniteLocalDate {
    fn from(date: NaiveDate) -> Self {
        FiniteLocalDate(date)
    }
}

impl std::fmt::Display for FiniteLocalDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_DISPLAY))
    }
}
