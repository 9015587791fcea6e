#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The caller passed a value that violates a constraint, like a negative
    /// number of days or a period whose start is after its end.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation that only makes sense on finite values was called on
    /// an infinite one.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("cannot parse {0:?}")]
    Parse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) const INFINITE_DATE: &str = "date is infinite";
pub(crate) const INFINITE_DURATION: &str = "duration is infinite";
