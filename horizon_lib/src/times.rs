use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use parking_lot::RwLock;

/// The reference time for everything that is relative to "now" (today,
/// days after today, is_after_now,...).
///
/// By default this follows the system clock.  Tests can fix it to a known
/// value so that relative dates are deterministic.  The override is global
/// to the process, not per-thread: tests that fix the clock must not run
/// concurrently with tests that read it (see `serial_test`).
static FIXED_NOW: RwLock<Option<NaiveDateTime>> = parking_lot::const_rwlock(None);

/// The current local time, truncated to the second.
/// Returns the fixed value if the clock has been fixed.
#[must_use]
pub fn now() -> NaiveDateTime {
    match *FIXED_NOW.read() {
        Some(fixed) => fixed,
        None => Local::now().naive_local().trunc_subsecs(0),
    }
}

/// The calendar date of `now()`.
#[must_use]
pub fn today() -> NaiveDate {
    now().date()
}

/// Freeze "now" at the given time, until `reset()` is called.
pub fn fix(at: NaiveDateTime) {
    let at = at.trunc_subsecs(0);
    log::debug!("fixing clock at {at}");
    *FIXED_NOW.write() = Some(at);
}

/// Go back to following the system clock.
pub fn reset() {
    if FIXED_NOW.write().take().is_some() {
        log::debug!("clock reset to system time");
    }
}

/// Whether "now" is currently fixed.
#[must_use]
pub fn is_fixed() -> bool {
    FIXED_NOW.read().is_some()
}
