//! Offsetting a period identifier by an interval and choosing how the result
//! is written back.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::PeriodResult;
use crate::interval::{IntervalUnit, apply_interval, parse_interval};
use crate::period::{Granularity, Period, PeriodIdentifier, parse_period_identifier};

/// Returned by [`calc_offset_date_str`] in place of any error, so callers can
/// drop the result straight into note text.
pub const OFFSET_ERROR_SENTINEL: &str = "(error)";

/// Which period size the offset result is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OutputMode {
    /// Same size as the base period.
    #[default]
    SameAsInput,
    /// Always a week identifier.
    Week,
    /// The size the interval unit counts in.
    Offset,
    /// The finer of the base period and the interval unit.
    Shorter,
    /// The coarser of the two.
    Longer,
}

impl OutputMode {
    pub fn output_granularity(self, input: Granularity, unit: IntervalUnit) -> Granularity {
        match self {
            OutputMode::SameAsInput => input,
            OutputMode::Week => Granularity::Week,
            OutputMode::Offset => unit.granularity(),
            OutputMode::Shorter => input.min(unit.granularity()),
            OutputMode::Longer => input.max(unit.granularity()),
        }
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "same" => Ok(OutputMode::SameAsInput),
            "week" => Ok(OutputMode::Week),
            "offset" => Ok(OutputMode::Offset),
            "shorter" => Ok(OutputMode::Shorter),
            "longer" => Ok(OutputMode::Longer),
            other => Err(format!("Unknown output mode: {other} (same|week|offset|shorter|longer)")),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputMode::SameAsInput => "same",
            OutputMode::Week => "week",
            OutputMode::Offset => "offset",
            OutputMode::Shorter => "shorter",
            OutputMode::Longer => "longer",
        };
        f.write_str(name)
    }
}

/// Offset the period named by `base` by `interval`.
///
/// The interval is applied to the first day of the base period; the result is
/// the period of the size picked by `mode` that contains the moved date, with
/// the base's folder prefix, extension and day style carried over.
pub fn calc_offset(base: &str, interval: &str, mode: OutputMode) -> PeriodResult<PeriodIdentifier> {
    let ident = parse_period_identifier(base)?;
    let spec = parse_interval(interval)?;
    let moved = apply_interval(ident.period.start()?, spec)?;
    let granularity = mode.output_granularity(ident.period.granularity(), spec.unit);
    Ok(ident.with_period(Period::containing(moved, granularity)))
}

/// [`calc_offset`] as a string, with every failure collapsed to
/// [`OFFSET_ERROR_SENTINEL`].
pub fn calc_offset_date_str(base: &str, interval: &str, mode: OutputMode) -> String {
    match calc_offset(base, interval, mode) {
        Ok(ident) => ident.to_string(),
        Err(err) => {
            debug!(base, interval, %mode, error = %err, "offset failed");
            OFFSET_ERROR_SENTINEL.to_string()
        }
    }
}

pub fn calc_offset_date(base: NaiveDate, interval: &str) -> PeriodResult<NaiveDate> {
    apply_interval(base, parse_interval(interval)?)
}

/// Convenience check used by callers that only hold the rendered string.
pub fn is_offset_error(result: &str) -> bool {
    result == OFFSET_ERROR_SENTINEL
}
