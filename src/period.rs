//! Calendar period identifiers as they appear in note filenames:
//! `2022-01-31`, `20220131`, `2022-W05`, `2022-01`, `2022-Q1`, `2022H1`,
//! `2022`, optionally behind a teamspace folder and with a file extension.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{PeriodError, PeriodResult};
use crate::interval::{IntervalSpec, IntervalUnit, apply_interval};
use crate::week::{self, WeekIndex};

/// Cloud teamspace folder that may precede a calendar note filename.
const TEAMSPACE_PATTERN: &str = r"^%%NotePlanCloud%%/[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}/";
const NOTE_EXTENSIONS: &[&str] = &[".md", ".txt"];

/// Period sizes from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl Granularity {
    /// Interval unit that steps one period of this size.
    pub fn unit(self) -> IntervalUnit {
        match self {
            Granularity::Day => IntervalUnit::Day,
            Granularity::Week => IntervalUnit::Week,
            Granularity::Month => IntervalUnit::Month,
            Granularity::Quarter => IntervalUnit::Quarter,
            Granularity::HalfYear => IntervalUnit::HalfYear,
            Granularity::Year => IntervalUnit::Year,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::HalfYear => "half-year",
            Granularity::Year => "year",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day(NaiveDate),
    Week { year: i32, week: u32 },
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    HalfYear { year: i32, half: u32 },
    Year { year: i32 },
}

impl Period {
    pub fn granularity(&self) -> Granularity {
        match self {
            Period::Day(_) => Granularity::Day,
            Period::Week { .. } => Granularity::Week,
            Period::Month { .. } => Granularity::Month,
            Period::Quarter { .. } => Granularity::Quarter,
            Period::HalfYear { .. } => Granularity::HalfYear,
            Period::Year { .. } => Granularity::Year,
        }
    }

    /// The period of the given size that contains `date`.
    pub fn containing(date: NaiveDate, granularity: Granularity) -> Period {
        match granularity {
            Granularity::Day => Period::Day(date),
            Granularity::Week => {
                let WeekIndex { week, year } = week::week_of(date);
                Period::Week { year, week }
            }
            Granularity::Month => Period::Month { year: date.year(), month: date.month() },
            Granularity::Quarter => {
                Period::Quarter { year: date.year(), quarter: (date.month() - 1) / 3 + 1 }
            }
            Granularity::HalfYear => {
                Period::HalfYear { year: date.year(), half: (date.month() - 1) / 6 + 1 }
            }
            Granularity::Year => Period::Year { year: date.year() },
        }
    }

    /// First and last day covered by the period.
    pub fn bounds(&self) -> PeriodResult<(NaiveDate, NaiveDate)> {
        match *self {
            Period::Day(date) => Ok((date, date)),
            Period::Week { year, week } => {
                if !(1..=53).contains(&week) {
                    return Err(PeriodError::out_of_range("week", week));
                }
                Ok(week::week_start_end(week as i32, year))
            }
            Period::Month { year, month } => week::month_start_end(month, year),
            Period::Quarter { year, quarter } => week::quarter_start_end(quarter, year),
            Period::HalfYear { year, half } => week::half_year_start_end(half, year),
            Period::Year { year } => week::year_start_end(year),
        }
    }

    pub fn start(&self) -> PeriodResult<NaiveDate> {
        self.bounds().map(|(start, _)| start)
    }

    pub fn end(&self) -> PeriodResult<NaiveDate> {
        self.bounds().map(|(_, end)| end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.bounds().is_ok_and(|(start, end)| start <= date && date <= end)
    }

    pub fn next(&self) -> PeriodResult<Period> {
        self.step(1)
    }

    pub fn prev(&self) -> PeriodResult<Period> {
        self.step(-1)
    }

    fn step(&self, count: i64) -> PeriodResult<Period> {
        let granularity = self.granularity();
        let spec = IntervalSpec { count, unit: granularity.unit() };
        let moved = apply_interval(self.start()?, spec)?;
        Ok(Period::containing(moved, granularity))
    }

    fn write_compact(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Day(date) => {
                write!(f, "{:04}{:02}{:02}", date.year(), date.month(), date.day())
            }
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Day(date) => {
                write!(f, "{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
            }
            Period::Week { year, week } => write!(f, "{year:04}-W{week:02}"),
            Period::Month { year, month } => write!(f, "{year:04}-{month:02}"),
            Period::Quarter { year, quarter } => write!(f, "{year:04}-Q{quarter}"),
            Period::HalfYear { year, half } => write!(f, "{year:04}H{half}"),
            Period::Year { year } => write!(f, "{year:04}"),
        }
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bare_period(s.trim()).map(|(period, _)| period)
    }
}

/// How a day period was (or should be) written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum DayStyle {
    #[default]
    Iso,
    Compact,
}

/// A period plus the filename decoration it was found with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeriodIdentifier {
    pub prefix: Option<String>,
    pub period: Period,
    pub day_style: DayStyle,
    pub extension: Option<String>,
}

impl PeriodIdentifier {
    pub fn new(period: Period) -> Self {
        Self { prefix: None, period, day_style: DayStyle::Iso, extension: None }
    }

    /// Same decoration around a different period.
    pub fn with_period(&self, period: Period) -> Self {
        Self { period, ..self.clone() }
    }
}

impl fmt::Display for PeriodIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            f.write_str(prefix)?;
        }
        match self.day_style {
            DayStyle::Compact => self.period.write_compact(f)?,
            DayStyle::Iso => write!(f, "{}", self.period)?,
        }
        if let Some(ext) = &self.extension {
            f.write_str(ext)?;
        }
        Ok(())
    }
}

impl FromStr for PeriodIdentifier {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_period_identifier(s)
    }
}

pub fn parse_period_identifier(text: &str) -> PeriodResult<PeriodIdentifier> {
    let mut rest = text.trim();

    let prefix = teamspace_re().find(rest).map(|m| m.as_str().to_string());
    if let Some(p) = &prefix {
        rest = &rest[p.len()..];
    }

    let extension = NOTE_EXTENSIONS
        .iter()
        .find(|ext| rest.len() > ext.len() && rest.ends_with(*ext))
        .map(|ext| ext.to_string());
    if let Some(ext) = &extension {
        rest = &rest[..rest.len() - ext.len()];
    }

    let (period, day_style) = parse_bare_period(rest)?;
    Ok(PeriodIdentifier { prefix, period, day_style, extension })
}

struct Shapes {
    compact_day: Regex,
    iso_day: Regex,
    week: Regex,
    quarter: Regex,
    half: Regex,
    month: Regex,
    year: Regex,
}

fn shapes() -> &'static Shapes {
    static SHAPES: OnceLock<Shapes> = OnceLock::new();
    SHAPES.get_or_init(|| Shapes {
        compact_day: Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("valid regex"),
        iso_day: Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid regex"),
        week: Regex::new(r"^(\d{4})-W(\d{2})$").expect("valid regex"),
        quarter: Regex::new(r"^(\d{4})-Q(\d)$").expect("valid regex"),
        half: Regex::new(r"^(\d{4})H(\d)$").expect("valid regex"),
        month: Regex::new(r"^(\d{4})-(\d{2})$").expect("valid regex"),
        year: Regex::new(r"^(\d{4})$").expect("valid regex"),
    })
}

fn teamspace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TEAMSPACE_PATTERN).expect("valid regex"))
}

fn parse_bare_period(text: &str) -> PeriodResult<(Period, DayStyle)> {
    let s = shapes();

    if let Some(caps) = s.compact_day.captures(text) {
        let date = day_from_parts(&caps[1], &caps[2], &caps[3])?;
        return Ok((Period::Day(date), DayStyle::Compact));
    }
    if let Some(caps) = s.iso_day.captures(text) {
        let date = day_from_parts(&caps[1], &caps[2], &caps[3])?;
        return Ok((Period::Day(date), DayStyle::Iso));
    }
    if let Some(caps) = s.week.captures(text) {
        let year = number(&caps[1])? as i32;
        let week = in_range("week", &caps[2], 1..=53)?;
        return Ok((Period::Week { year, week }, DayStyle::Iso));
    }
    if let Some(caps) = s.quarter.captures(text) {
        let year = number(&caps[1])? as i32;
        let quarter = in_range("quarter", &caps[2], 1..=4)?;
        return Ok((Period::Quarter { year, quarter }, DayStyle::Iso));
    }
    if let Some(caps) = s.half.captures(text) {
        let year = number(&caps[1])? as i32;
        let half = in_range("half", &caps[2], 1..=2)?;
        return Ok((Period::HalfYear { year, half }, DayStyle::Iso));
    }
    if let Some(caps) = s.month.captures(text) {
        let year = number(&caps[1])? as i32;
        let month = in_range("month", &caps[2], 1..=12)?;
        return Ok((Period::Month { year, month }, DayStyle::Iso));
    }
    if let Some(caps) = s.year.captures(text) {
        let year = number(&caps[1])? as i32;
        return Ok((Period::Year { year }, DayStyle::Iso));
    }

    Err(PeriodError::Malformed(text.to_string()))
}

fn day_from_parts(year: &str, month: &str, day: &str) -> PeriodResult<NaiveDate> {
    let year = number(year)? as i32;
    let month = in_range("month", month, 1..=12)?;
    let day_num = in_range("day", day, 1..=31)?;
    NaiveDate::from_ymd_opt(year, month, day_num)
        .ok_or_else(|| PeriodError::out_of_range("day", day_num))
}

fn in_range(field: &'static str, digits: &str, range: std::ops::RangeInclusive<u32>) -> PeriodResult<u32> {
    let value = number(digits)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(PeriodError::out_of_range(field, value))
    }
}

// Inputs are regex-checked digit runs of at most four characters.
fn number(digits: &str) -> PeriodResult<u32> {
    digits.parse().map_err(|_| PeriodError::Malformed(digits.to_string()))
}
