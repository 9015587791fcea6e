use crate::errors::{Error, Result, INFINITE_DATE};
use chrono::{Datelike, Month, NaiveDate, Weekday};

/// The vocabulary shared by every date-like value: finite and infinite
/// dates, and date-times.
///
/// The calendar fields are all computed from `calendar_date()`.  They fail
/// with an illegal-state error when there is no calendar date, i.e. for the
/// infinite date, so callers should check `is_infinite()` first.
pub trait Date {
    /// The calendar date, or None for an infinite date.
    fn calendar_date(&self) -> Option<NaiveDate>;

    #[must_use]
    fn is_after_now(&self) -> bool;

    #[must_use]
    fn is_before_now(&self) -> bool;

    /// Format using a chrono strftime pattern.
    fn format(&self, pattern: &str) -> Result<String>;

    #[must_use]
    fn is_infinite(&self) -> bool {
        self.calendar_date().is_none()
    }

    fn year(&self) -> Result<i32> {
        finite(self).map(|d| d.year())
    }

    /// 1 for January, up to 12 for December.
    fn month_of_year(&self) -> Result<u32> {
        finite(self).map(|d| d.month())
    }

    fn month(&self) -> Result<Month> {
        finite(self).and_then(month_of)
    }

    fn day_of_month(&self) -> Result<u32> {
        finite(self).map(|d| d.day())
    }

    /// 1 for Monday, up to 7 for Sunday.
    fn day_of_week(&self) -> Result<u32> {
        finite(self).map(|d| d.weekday().number_from_monday())
    }

    fn day(&self) -> Result<Weekday> {
        finite(self).map(|d| d.weekday())
    }

    /// The ISO 8601 week number.
    fn week_of_year(&self) -> Result<u32> {
        finite(self).map(|d| d.iso_week().week())
    }

    fn is_first_day_of_month(&self) -> Result<bool> {
        finite(self).map(|d| d.day() == 1)
    }

    fn is_last_day_of_month(&self) -> Result<bool> {
        finite(self).map(is_last_day_of_month)
    }

    fn is_weekend(&self) -> Result<bool> {
        finite(self).map(is_weekend)
    }
}

fn finite<D: Date + ?Sized>(date: &D) -> Result<NaiveDate> {
    date.calendar_date().ok_or(Error::IllegalState(INFINITE_DATE))
}

fn month_of(date: NaiveDate) -> Result<Month> {
    u8::try_from(date.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(Error::IllegalState("month out of range"))
}

/// True when the next day starts a new month.  The calendar engine knows
/// about month lengths and leap years.
fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().map_or(true, |next| next.day() == 1)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
