use crate::errors::{Error, Result, INFINITE_DURATION};
use std::str::FromStr;

/// A span of whole days, or the unbounded span.
///
/// Finite durations are ordered by their number of days, and the infinite
/// duration is greater than all of them.  There is only one infinite
/// duration, so all infinite durations are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Duration(Span);

// Variant order matters: it gives the derived ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Span {
    Days(i64), // never negative
    Infinite,
}

impl Duration {
    /// A finite duration.  Fails if `days` is negative.
    pub fn of_days(days: i64) -> Result<Self> {
        if days < 0 {
            return Err(Error::InvalidArgument(format!(
                "duration cannot be negative: {days} days"
            )));
        }
        Ok(Duration(Span::Days(days)))
    }

    #[must_use]
    pub const fn infinite() -> Self {
        Duration(Span::Infinite)
    }

    #[must_use]
    pub fn is_infinite(&self) -> bool {
        matches!(self.0, Span::Infinite)
    }

    /// The number of days.  Check `is_infinite()` first: this fails for
    /// the infinite duration.
    pub fn days(&self) -> Result<i64> {
        match self.0 {
            Span::Days(days) => Ok(days),
            Span::Infinite => Err(Error::IllegalState(INFINITE_DURATION)),
        }
    }

    /// The number of days, or None for the infinite duration.
    #[must_use]
    pub fn finite_days(&self) -> Option<i64> {
        match self.0 {
            Span::Days(days) => Some(days),
            Span::Infinite => None,
        }
    }

    /// Lengthen or shorten by a number of days.  The infinite duration is
    /// unchanged.  Fails if the result would be negative.
    pub(crate) fn plus_days(&self, days: i64) -> Result<Self> {
        match self.0 {
            Span::Days(current) => {
                Duration::of_days(current.saturating_add(days))
            }
            Span::Infinite => Ok(*self),
        }
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Span::Days(days) => write!(f, "{days}"),
            Span::Infinite => write!(f, "infinite"),
        }
    }
}

impl FromStr for Duration {
    type Err = Error;

    /// Accepts what `to_string()` produces: a number of days or "infinite".
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("infinite") {
            Ok(Duration::infinite())
        } else {
            Duration::of_days(s.parse::<i64>()?)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(d: &Duration) -> u64 {
        let mut hasher = DefaultHasher::new();
        d.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_finite() -> anyhow::Result<()> {
        let duration = Duration::of_days(0)?;
        assert!(!duration.is_infinite());
        assert_eq!(duration.days()?, 0);

        let duration = Duration::of_days(14)?;
        assert!(!duration.is_infinite());
        assert_eq!(duration.days()?, 14);
        Ok(())
    }

    #[test]
    fn test_negative() {
        assert!(matches!(
            Duration::of_days(-1),
            Err(Error::InvalidArgument(msg)) if msg.contains("negative")
        ));
    }

    #[test]
    fn test_infinite() {
        let duration = Duration::infinite();
        assert!(duration.is_infinite());
        match duration.days() {
            Err(e) => assert!(e.to_string().contains("infinite")),
            Ok(d) => panic!("infinite duration has {d} days"),
        }
    }

    #[test]
    fn test_display() -> anyhow::Result<()> {
        assert_eq!(Duration::of_days(123)?.to_string(), "123");
        assert_eq!(Duration::of_days(1)?.to_string(), "1");
        assert_eq!(Duration::of_days(0)?.to_string(), "0");
        assert_eq!(Duration::infinite().to_string(), "infinite");
        Ok(())
    }

    #[test]
    fn test_from_str() -> anyhow::Result<()> {
        assert_eq!("12".parse::<Duration>()?, Duration::of_days(12)?);
        assert_eq!("infinite".parse::<Duration>()?, Duration::infinite());
        assert!(matches!(
            "twelve".parse::<Duration>(),
            Err(Error::ParseIntError(_))
        ));
        assert!(matches!(
            "-3".parse::<Duration>(),
            Err(Error::InvalidArgument(_))
        ));
        Ok(())
    }

    #[test]
    fn test_equality() -> anyhow::Result<()> {
        assert_eq!(Duration::of_days(10)?, Duration::of_days(10)?);
        assert_eq!(Duration::infinite(), Duration::infinite());
        assert_ne!(Duration::of_days(10)?, Duration::of_days(11)?);
        assert_ne!(Duration::of_days(0)?, Duration::of_days(1)?);
        assert_ne!(Duration::of_days(10)?, Duration::infinite());
        assert_ne!(Duration::infinite(), Duration::of_days(10)?);

        assert_eq!(hash_of(&Duration::of_days(10)?), hash_of(&Duration::of_days(10)?));
        assert_eq!(hash_of(&Duration::infinite()), hash_of(&Duration::infinite()));
        Ok(())
    }

    #[test]
    fn test_ord() -> anyhow::Result<()> {
        assert!(Duration::of_days(10)? < Duration::of_days(11)?);
        assert!(Duration::of_days(10)? > Duration::of_days(1)?);
        assert_eq!(
            Duration::of_days(20)?.cmp(&Duration::of_days(20)?),
            std::cmp::Ordering::Equal,
        );
        assert!(Duration::infinite() > Duration::of_days(10)?);
        assert!(Duration::of_days(i64::MAX)? < Duration::infinite());
        assert_eq!(
            Duration::infinite().cmp(&Duration::infinite()),
            std::cmp::Ordering::Equal,
        );
        Ok(())
    }

    #[test]
    fn test_plus_days() -> anyhow::Result<()> {
        assert_eq!(Duration::of_days(10)?.plus_days(1)?, Duration::of_days(11)?);
        assert_eq!(Duration::of_days(10)?.plus_days(-1)?, Duration::of_days(9)?);
        assert!(Duration::of_days(0)?.plus_days(-1).is_err());
        assert_eq!(Duration::infinite().plus_days(-1)?, Duration::infinite());
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_of_days(days in any::<i64>()) {
            match Duration::of_days(days) {
                Ok(d) => {
                    prop_assert!(days >= 0);
                    prop_assert!(!d.is_infinite());
                    prop_assert_eq!(d.days().unwrap(), days);
                }
                Err(_) => prop_assert!(days < 0),
            }
        }
    }
}
