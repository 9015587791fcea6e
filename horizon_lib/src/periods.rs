use crate::durations::Duration;
use crate::errors::{Error, Result};
use crate::local_dates::LocalDate;
use std::hash::{Hash, Hasher};

/// A closed interval of dates:
///    [start, end]
/// Both bounds are included, so a period from a date to itself lasts one
/// day.  The end might be the infinite date, for open-ended periods.
#[derive(Debug, Clone, Copy)]
pub struct Period {
    start: LocalDate,
    end: LocalDate,
    duration: Duration,
}

impl Period {
    /// Left-closed, right-closed period from start to end.
    /// Fails when start is after end.
    pub fn new(
        start: impl Into<LocalDate>,
        end: impl Into<LocalDate>,
    ) -> Result<Self> {
        let start = start.into();
        let end = end.into();
        if start.is_after(end) {
            return Err(Error::InvalidArgument(format!(
                "start date {start} is after end date {end}: \
                 cannot get duration to earlier date"
            )));
        }
        Ok(Period {
            start,
            end,
            duration: start.duration_until(end)?.plus_days(1)?,
        })
    }

    /// A period that lasts `duration` days, including the start date.
    /// Fails for an empty duration, since the end would be before start,
    /// and when the end is past the last date chrono can represent.
    pub fn with_duration(
        start: impl Into<LocalDate>,
        duration: Duration,
    ) -> Result<Self> {
        let start = start.into();
        let end = match start {
            LocalDate::Infinite => LocalDate::Infinite,
            LocalDate::Finite(_) => {
                start.plus_duration(duration.plus_days(-1)?)?
            }
        };
        Ok(Period {
            start,
            end,
            duration,
        })
    }

    #[must_use]
    pub fn start_date(&self) -> LocalDate {
        self.start
    }

    #[must_use]
    pub fn end_date(&self) -> LocalDate {
        self.end
    }

    /// Number of days in the period, infinite if the end is infinite.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the two periods have at least one date in common.
    /// Periods that only share a boundary date do overlap.
    #[must_use]
    pub fn is_overlapping(&self, other: &Period) -> bool {
        !(self.end.is_before(other.start) || other.end.is_before(self.start))
    }

    #[must_use]
    pub fn contains(&self, date: impl Into<LocalDate>) -> bool {
        date.into().is_between(self.start, self.end)
    }

    /// True if all dates are in the period (or there are no dates).
    #[must_use]
    pub fn contains_all<I>(&self, dates: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<LocalDate>,
    {
        dates.into_iter().all(|d| self.contains(d))
    }
}

/// Two periods are equal when they have the same bounds and duration.  The
/// duration follows from the bounds, except when the start is infinite.
impl PartialEq for Period {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.duration == other.duration
    }
}

impl Eq for Period {}

impl Hash for Period {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        self.duration.hash(state);
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
