pub mod dates;
pub mod durations;
pub mod errors;
pub mod finite_local_dates;
pub mod formatters;
pub mod local_date_times;
pub mod local_dates;
pub mod periods;
pub mod times;

pub use chrono::{Month, Weekday};
pub use dates::Date;
pub use durations::Duration;
pub use errors::{Error, Result};
pub use finite_local_dates::FiniteLocalDate;
pub use local_date_times::LocalDateTime;
pub use local_dates::LocalDate;
pub use periods::Period;
