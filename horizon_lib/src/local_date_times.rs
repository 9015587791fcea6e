use crate::dates::Date;
use crate::errors::{Error, Result};
use crate::finite_local_dates::FiniteLocalDate;
use crate::formatters::{self, DATE_TIME_DISPLAY};
use crate::local_dates::LocalDate;
use crate::times;
use chrono::{
    Month, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeDelta,
    Timelike,
};
use std::str::FromStr;

/// A point in local time, with a precision of one second.
///
/// Anything finer than a second is dropped on construction, so two
/// date-times built from the same wall clock reading are always equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalDateTime(NaiveDateTime);

impl LocalDateTime {
    /// The current time, as seen by the (possibly fixed) clock.
    #[must_use]
    pub fn now() -> Self {
        LocalDateTime(times::now())
    }

    pub fn at(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        let date = FiniteLocalDate::on(year, month, day)?;
        Self::on_date_at(date, hour, minute, second)
    }

    pub fn at_month(
        year: i32,
        month: Month,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        Self::at(year, month.number_from_month(), day, hour, minute, second)
    }

    /// The given date, at the given time of day.
    pub fn on_date_at(
        date: FiniteLocalDate,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "not a time of day: {hour:02}:{minute:02}:{second:02}"
            ))
        })?;
        Ok(LocalDateTime(date.to_calendar().and_time(time)))
    }

    #[must_use]
    pub fn on_date(instant: NaiveDateTime) -> Self {
        LocalDateTime(instant.trunc_subsecs(0))
    }

    /// Same time of day as now, some days earlier.
    #[must_use]
    pub fn at_days_before_today(days: i64) -> Self {
        Self::now().minus_days(days)
    }

    #[must_use]
    pub fn at_days_after_today(days: i64) -> Self {
        Self::now().plus_days(days)
    }

    /// Midnight at the start of a day some days before today.
    #[must_use]
    pub fn at_midnight_days_before_today(days: i64) -> Self {
        Self::at_midnight(FiniteLocalDate::days_before_today(days))
    }

    #[must_use]
    pub fn at_midnight_days_after_today(days: i64) -> Self {
        Self::at_midnight(FiniteLocalDate::days_after_today(days))
    }

    fn at_midnight(date: FiniteLocalDate) -> Self {
        LocalDateTime(date.get_date())
    }

    #[must_use]
    pub fn hours_before_now(hours: i64) -> Self {
        Self::now().minus_hours(hours)
    }

    #[must_use]
    pub fn hours_after_now(hours: i64) -> Self {
        Self::now().plus_hours(hours)
    }

    /// None if the text is missing, empty or doesn't match the pattern.  A
    /// pattern without time fields gives midnight.
    #[must_use]
    pub fn parse_date_time<'a>(
        text: impl Into<Option<&'a str>>,
        pattern: &str,
    ) -> Option<Self> {
        formatters::parse_date_time(text, pattern).map(Self::on_date)
    }

    /// # Panics
    ///
    /// If the result is outside of the range supported by chrono.
    #[must_use]
    pub fn plus_seconds(&self, seconds: i64) -> Self {
        LocalDateTime(self.0 + TimeDelta::seconds(seconds))
    }

    #[must_use]
    pub fn minus_seconds(&self, seconds: i64) -> Self {
        LocalDateTime(self.0 - TimeDelta::seconds(seconds))
    }

    #[must_use]
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        LocalDateTime(self.0 + TimeDelta::minutes(minutes))
    }

    #[must_use]
    pub fn minus_minutes(&self, minutes: i64) -> Self {
        LocalDateTime(self.0 - TimeDelta::minutes(minutes))
    }

    #[must_use]
    pub fn plus_hours(&self, hours: i64) -> Self {
        LocalDateTime(self.0 + TimeDelta::hours(hours))
    }

    #[must_use]
    pub fn minus_hours(&self, hours: i64) -> Self {
        LocalDateTime(self.0 - TimeDelta::hours(hours))
    }

    #[must_use]
    pub fn plus_days(&self, days: i64) -> Self {
        LocalDateTime(self.0 + TimeDelta::days(days))
    }

    #[must_use]
    pub fn minus_days(&self, days: i64) -> Self {
        LocalDateTime(self.0 - TimeDelta::days(days))
    }

    /// Number of calendar days between the two dates, ignoring the time
    /// of day.  Negative when other is earlier.
    #[must_use]
    pub fn days_until(&self, other: &LocalDateTime) -> i64 {
        self.to_local_date().days_until(&other.to_local_date())
    }

    #[must_use]
    pub fn is_after(&self, other: &LocalDateTime) -> bool {
        self > other
    }

    #[must_use]
    pub fn is_before(&self, other: &LocalDateTime) -> bool {
        self < other
    }

    #[must_use]
    pub fn is_on_or_after(&self, other: &LocalDateTime) -> bool {
        self >= other
    }

    #[must_use]
    pub fn is_on_or_before(&self, other: &LocalDateTime) -> bool {
        self <= other
    }

    /// Whether self is in the closed range `[start, end]`.
    #[must_use]
    pub fn is_between(&self, start: &LocalDateTime, end: &LocalDateTime) -> bool {
        self >= start && self <= end
    }

    /// The date part, dropping the time of day.
    #[must_use]
    pub fn to_local_date(&self) -> FiniteLocalDate {
        FiniteLocalDate::on_date(self.0)
    }

    #[must_use]
    pub fn get_date(&self) -> NaiveDateTime {
        self.0
    }

    #[must_use]
    pub fn hour_of_day(&self) -> u32 {
        self.0.hour()
    }

    #[must_use]
    pub fn minute_of_hour(&self) -> u32 {
        self.0.minute()
    }

    #[must_use]
    pub fn second_of_minute(&self) -> u32 {
        self.0.second()
    }

    /// Fix the clock used by every "now" and "today" operation in this
    /// crate, until `reset_system_date_time()`.
    pub fn set_system_date_time(at: LocalDateTime) {
        times::fix(at.0);
    }

    pub fn reset_system_date_time() {
        times::reset();
    }

    #[must_use]
    pub fn is_system_date_time_fixed() -> bool {
        times::is_fixed()
    }
}

impl Date for LocalDateTime {
    fn calendar_date(&self) -> Option<NaiveDate> {
        Some(self.0.date())
    }

    /// Compared to the second, unlike dates which compare to today.
    fn is_after_now(&self) -> bool {
        self.0 > times::now()
    }

    fn is_before_now(&self) -> bool {
        self.0 < times::now()
    }

    fn format(&self, pattern: &str) -> Result<String> {
        formatters::format_date_time(&self.0, pattern)
    }
}

impl From<LocalDateTime> for LocalDate {
    fn from(value: LocalDateTime) -> Self {
        LocalDate::Finite(value.to_local_date())
    }
}

impl std::fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_TIME_DISPLAY))
    }
}

impl FromStr for LocalDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::parse_date_time(s, DATE_TIME_DISPLAY)
            .ok_or_else(|| Error::Parse(s.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use serial_test::serial;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> LocalDateTime {
        LocalDateTime::at(y, m, d, h, mi, s).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> FiniteLocalDate {
        FiniteLocalDate::on(y, m, d).unwrap()
    }

    #[test]
    fn test_at() -> anyhow::Result<()> {
        let dt = LocalDateTime::at(2001, 10, 25, 23, 1, 2)?;
        assert_eq!(dt.year()?, 2001);
        assert_eq!(dt.month_of_year()?, 10);
        assert_eq!(dt.month()?, Month::October);
        assert_eq!(dt.day_of_month()?, 25);
        assert_eq!(dt.hour_of_day(), 23);
        assert_eq!(dt.minute_of_hour(), 1);
        assert_eq!(dt.second_of_minute(), 2);
        assert!(!dt.is_infinite());
        assert_eq!(LocalDateTime::at_month(2001, Month::October, 25, 23, 1, 2)?, dt);
        assert_eq!(LocalDateTime::on_date_at(day(2001, 10, 25), 23, 1, 2)?, dt);
        Ok(())
    }

    #[test]
    fn test_invalid() {
        assert!(LocalDateTime::at(2001, 2, 30, 0, 0, 0).is_err());
        assert!(matches!(
            LocalDateTime::at(2001, 10, 25, 24, 0, 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(LocalDateTime::at(2001, 10, 25, 0, 60, 0).is_err());
        assert!(LocalDateTime::at(2001, 10, 25, 0, 0, 60).is_err());
    }

    #[test]
    fn test_on_date_truncates() {
        let instant = NaiveDate::from_ymd_opt(2001, 10, 25)
            .unwrap()
            .and_hms_milli_opt(12, 25, 20, 55)
            .unwrap();
        let dt = LocalDateTime::on_date(instant);
        assert_eq!(dt, at(2001, 10, 25, 12, 25, 20));
        assert_eq!(dt.get_date().nanosecond(), 0);
        assert_eq!(dt.to_local_date(), day(2001, 10, 25));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(
            at(2007, 1, 31, 23, 59, 45).plus_seconds(20),
            at(2007, 2, 1, 0, 0, 5),
        );
        assert_eq!(
            at(2007, 2, 1, 0, 0, 5).minus_seconds(20),
            at(2007, 1, 31, 23, 59, 45),
        );
        assert_eq!(
            at(2007, 12, 31, 23, 50, 0).plus_minutes(15),
            at(2008, 1, 1, 0, 5, 0),
        );
        assert_eq!(
            at(2008, 1, 1, 0, 5, 0).minus_minutes(15),
            at(2007, 12, 31, 23, 50, 0),
        );
        assert_eq!(
            at(2004, 2, 28, 22, 0, 0).plus_hours(3),
            at(2004, 2, 29, 1, 0, 0),
        );
        assert_eq!(
            at(2004, 3, 1, 1, 0, 0).minus_hours(3),
            at(2004, 2, 29, 22, 0, 0),
        );
        assert_eq!(
            at(2001, 10, 24, 10, 30, 0).plus_days(8),
            at(2001, 11, 1, 10, 30, 0),
        );
        assert_eq!(
            at(2001, 11, 1, 10, 30, 0).minus_days(8),
            at(2001, 10, 24, 10, 30, 0),
        );
        assert_eq!(
            at(2001, 10, 24, 10, 30, 0).plus_days(-1),
            at(2001, 10, 23, 10, 30, 0),
        );
    }

    #[test]
    fn test_days_until() {
        let start = at(1963, 11, 22, 12, 30, 0);
        assert_eq!(start.days_until(&at(1963, 11, 22, 0, 0, 0)), 0);
        assert_eq!(start.days_until(&at(1963, 11, 22, 23, 59, 59)), 0);
        assert_eq!(start.days_until(&at(1963, 11, 23, 0, 0, 0)), 1);
        assert_eq!(start.days_until(&at(1963, 11, 27, 8, 0, 0)), 5);
        assert_eq!(start.days_until(&at(1963, 11, 17, 8, 0, 0)), -5);
        assert_eq!(start.days_until(&at(1964, 11, 22, 8, 0, 0)), 366);
        assert_eq!(start.days_until(&at(1962, 11, 22, 8, 0, 0)), -365);
        assert_eq!(start.days_until(&at(1969, 7, 20, 20, 17, 0)), 2067);
    }

    #[test]
    fn test_compare() {
        let dt = at(2001, 10, 24, 10, 30, 0);
        let later = dt.plus_seconds(1);
        assert!(later.is_after(&dt));
        assert!(!dt.is_after(&dt));
        assert!(dt.is_before(&later));
        assert!(!dt.is_before(&dt));
        assert!(dt.is_on_or_after(&dt));
        assert!(dt.is_on_or_before(&dt));
        assert!(!later.is_on_or_before(&dt));
        assert!(dt.is_between(&dt, &later));
        assert!(later.is_between(&dt, &later));
        assert!(!later.plus_seconds(1).is_between(&dt, &later));
    }

    #[test]
    fn test_calendar_fields() -> anyhow::Result<()> {
        let dt = at(2006, 11, 18, 10, 0, 0);
        assert!(dt.is_weekend()?);
        assert_eq!(dt.day_of_week()?, 6);
        assert_eq!(at(2006, 1, 3, 0, 0, 0).week_of_year()?, 1);
        assert!(at(2004, 2, 29, 23, 59, 59).is_last_day_of_month()?);
        assert!(at(2004, 3, 1, 0, 0, 0).is_first_day_of_month()?);
        assert_eq!(LocalDate::from(dt), LocalDate::from(LocalDate::on(2006, 11, 18)?));
        Ok(())
    }

    #[test]
    fn test_format() -> anyhow::Result<()> {
        let dt = at(1985, 7, 13, 10, 30, 55);
        assert_eq!(dt.to_string(), "Sat Jul 13 1985 10:30:55");
        assert_eq!(dt.format("%Y-%m-%d %H:%M")?, "1985-07-13 10:30");
        assert!(dt.format("%Q").is_err());

        assert_eq!("Sat Jul 13 1985 10:30:55".parse::<LocalDateTime>()?, dt);
        assert!(matches!(
            "at noon".parse::<LocalDateTime>(),
            Err(Error::Parse(_))
        ));
        Ok(())
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            LocalDateTime::parse_date_time("2007-01-01 10:30:01", "%Y-%m-%d %H:%M:%S"),
            Some(at(2007, 1, 1, 10, 30, 1)),
        );
        assert_eq!(
            LocalDateTime::parse_date_time("Sat Jul 13 1985 10:30:55", DATE_TIME_DISPLAY),
            Some(at(1985, 7, 13, 10, 30, 55)),
        );
        assert_eq!(
            LocalDateTime::parse_date_time("22/12/1977", "%d/%m/%Y"),
            Some(at(1977, 12, 22, 0, 0, 0)),
        );
        assert_eq!(LocalDateTime::parse_date_time("", "%d/%m/%Y"), None);
        assert_eq!(LocalDateTime::parse_date_time(None, "%d/%m/%Y"), None);
        assert_eq!(LocalDateTime::parse_date_time("noon", "%H:%M"), None);
    }

    #[test]
    #[serial]
    fn test_fixed_clock() {
        let fixed = at(1985, 7, 13, 9, 30, 0);
        LocalDateTime::set_system_date_time(fixed);
        assert!(LocalDateTime::is_system_date_time_fixed());
        assert_eq!(LocalDateTime::now(), fixed);

        assert_eq!(
            LocalDateTime::at_midnight_days_before_today(0),
            at(1985, 7, 13, 0, 0, 0),
        );
        assert_eq!(
            LocalDateTime::at_midnight_days_before_today(1),
            at(1985, 7, 12, 0, 0, 0),
        );
        assert_eq!(
            LocalDateTime::at_midnight_days_before_today(13),
            at(1985, 6, 30, 0, 0, 0),
        );
        assert_eq!(
            LocalDateTime::at_midnight_days_after_today(1),
            at(1985, 7, 14, 0, 0, 0),
        );
        assert_eq!(
            LocalDateTime::at_midnight_days_after_today(19),
            at(1985, 8, 1, 0, 0, 0),
        );
        assert_eq!(LocalDateTime::at_days_before_today(1), at(1985, 7, 12, 9, 30, 0));
        assert_eq!(LocalDateTime::at_days_after_today(1), at(1985, 7, 14, 9, 30, 0));
        assert_eq!(LocalDateTime::hours_before_now(10), at(1985, 7, 12, 23, 30, 0));
        assert_eq!(LocalDateTime::hours_after_now(15), at(1985, 7, 14, 0, 30, 0));

        assert!(fixed.plus_seconds(1).is_after_now());
        assert!(!fixed.is_after_now());
        assert!(!fixed.is_before_now());
        assert!(fixed.minus_seconds(1).is_before_now());

        LocalDateTime::reset_system_date_time();
        assert!(!LocalDateTime::is_system_date_time_fixed());
    }

    #[test]
    #[serial]
    fn test_system_clock() {
        LocalDateTime::reset_system_date_time();
        let now = LocalDateTime::now();
        assert!(LocalDateTime::hours_before_now(1).is_before(&now));
        assert!(LocalDateTime::hours_after_now(1).is_after(&now));
        assert!(LocalDateTime::at_midnight_days_before_today(0).is_on_or_before(&now));
        assert_eq!(now.get_date().nanosecond(), 0);
    }

    proptest! {
        #[test]
        fn prop_format_then_parse(
            days in -100_000i64..100_000,
            seconds in 0i64..86_400,
        ) {
            let dt = at(2000, 1, 1, 0, 0, 0).plus_days(days).plus_seconds(seconds);
            for pattern in [
                "%Y-%m-%d %H:%M:%S",
                "%d/%m/%Y %H:%M:%S",
                "%H:%M:%S on %m/%d/%Y",
                DATE_TIME_DISPLAY,
            ] {
                let text = dt.format(pattern).unwrap();
                prop_assert_eq!(
                    LocalDateTime::parse_date_time(text.as_str(), pattern),
                    Some(dt),
                );
            }
            prop_assert_eq!(dt.to_string().parse::<LocalDateTime>().unwrap(), dt);
        }
    }
}
