use thiserror::Error;

/// Failures while parsing or computing calendar periods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("not a recognized period identifier: {0:?}")]
    Malformed(String),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("invalid interval: {0:?}")]
    InvalidInterval(String),

    #[error("date arithmetic overflowed the supported calendar range")]
    Overflow,
}

impl PeriodError {
    pub(crate) fn out_of_range(field: &'static str, value: impl Into<i64>) -> Self {
        PeriodError::OutOfRange { field, value: value.into() }
    }
}

pub type PeriodResult<T> = Result<T, PeriodError>;

/// Problems with settings read from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a YYYY-MM-DD date, got {value:?}")]
    InvalidDate {
        var: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
