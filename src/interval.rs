//! Relative intervals such as `+3d`, `-2w`, `{^1b}` and their application
//! to calendar dates.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{PeriodError, PeriodResult};
use crate::period::Granularity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalUnit {
    /// Monday to Friday; weekends are stepped over.
    BusinessDay,
    Day,
    Week,
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl IntervalUnit {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'b' => Some(IntervalUnit::BusinessDay),
            'd' => Some(IntervalUnit::Day),
            'w' => Some(IntervalUnit::Week),
            'm' => Some(IntervalUnit::Month),
            'q' => Some(IntervalUnit::Quarter),
            'h' => Some(IntervalUnit::HalfYear),
            'y' => Some(IntervalUnit::Year),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            IntervalUnit::BusinessDay => 'b',
            IntervalUnit::Day => 'd',
            IntervalUnit::Week => 'w',
            IntervalUnit::Month => 'm',
            IntervalUnit::Quarter => 'q',
            IntervalUnit::HalfYear => 'h',
            IntervalUnit::Year => 'y',
        }
    }

    /// Period size a result in this unit is naturally expressed in.
    pub fn granularity(self) -> Granularity {
        match self {
            IntervalUnit::BusinessDay | IntervalUnit::Day => Granularity::Day,
            IntervalUnit::Week => Granularity::Week,
            IntervalUnit::Month => Granularity::Month,
            IntervalUnit::Quarter => Granularity::Quarter,
            IntervalUnit::HalfYear => Granularity::HalfYear,
            IntervalUnit::Year => Granularity::Year,
        }
    }

    /// Day-like units move by a fixed number of days; the rest move by
    /// calendar months.
    pub fn is_day_like(self) -> bool {
        matches!(self, IntervalUnit::BusinessDay | IntervalUnit::Day | IntervalUnit::Week)
    }

    fn months(self) -> Option<i64> {
        match self {
            IntervalUnit::Month => Some(1),
            IntervalUnit::Quarter => Some(3),
            IntervalUnit::HalfYear => Some(6),
            IntervalUnit::Year => Some(12),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalSpec {
    pub count: i64,
    pub unit: IntervalUnit,
}

impl IntervalSpec {
    pub fn new(count: i64, unit: IntervalUnit) -> Self {
        Self { count, unit }
    }
}

impl fmt::Display for IntervalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count > 0 {
            f.write_str("+")?;
        }
        write!(f, "{}{}", self.count, self.unit.letter())
    }
}

impl FromStr for IntervalSpec {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_interval(s)
    }
}

/// Offset markup found in note text. `chained` marks the `{^...}` form,
/// which counts from the previously calculated date instead of the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetMarkup {
    pub spec: IntervalSpec,
    pub chained: bool,
}

pub fn parse_interval(text: &str) -> PeriodResult<IntervalSpec> {
    parse_offset_markup(text).map(|markup| markup.spec)
}

pub fn parse_offset_markup(text: &str) -> PeriodResult<OffsetMarkup> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^([+-]?)(\d+)([bdwmqhy])$").expect("valid regex"));

    let invalid = || PeriodError::InvalidInterval(text.to_string());
    let mut body = text.trim();
    let mut chained = false;
    if let Some(inner) = body.strip_prefix('{').and_then(|b| b.strip_suffix('}')) {
        body = inner.trim();
        if let Some(rest) = body.strip_prefix('^') {
            chained = true;
            body = rest;
        }
    }

    let caps = re.captures(body).ok_or_else(invalid)?;
    let magnitude: i64 = caps[2].parse().map_err(|_| invalid())?;
    let count = if &caps[1] == "-" { -magnitude } else { magnitude };
    let unit = caps[3].chars().next().and_then(IntervalUnit::from_letter).ok_or_else(invalid)?;

    Ok(OffsetMarkup { spec: IntervalSpec { count, unit }, chained })
}

/// Move `base` by `spec`. Month-based units clamp to the last day of the
/// target month; business days skip Saturdays and Sundays.
pub fn apply_interval(base: NaiveDate, spec: IntervalSpec) -> PeriodResult<NaiveDate> {
    if let Some(per) = spec.unit.months() {
        let months = spec.count.checked_mul(per).ok_or(PeriodError::Overflow)?;
        return add_months(base, months);
    }
    match spec.unit {
        IntervalUnit::BusinessDay => add_business_days(base, spec.count),
        IntervalUnit::Week => add_days(base, spec.count.checked_mul(7).ok_or(PeriodError::Overflow)?),
        _ => add_days(base, spec.count),
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn add_days(base: NaiveDate, days: i64) -> PeriodResult<NaiveDate> {
    let delta = Days::new(days.unsigned_abs());
    let moved = if days >= 0 { base.checked_add_days(delta) } else { base.checked_sub_days(delta) };
    moved.ok_or(PeriodError::Overflow)
}

fn add_months(base: NaiveDate, months: i64) -> PeriodResult<NaiveDate> {
    let delta = u32::try_from(months.unsigned_abs())
        .map(Months::new)
        .map_err(|_| PeriodError::Overflow)?;
    let moved = if months >= 0 { base.checked_add_months(delta) } else { base.checked_sub_months(delta) };
    moved.ok_or(PeriodError::Overflow)
}

fn add_business_days(base: NaiveDate, count: i64) -> PeriodResult<NaiveDate> {
    let step = if count < 0 { -1 } else { 1 };
    let mut remaining = count.unsigned_abs();
    let mut date = base;

    while remaining > 0 {
        // from a weekday, five business days always land on the same weekday
        if remaining >= 5 && !is_weekend(date) {
            let days = i64::try_from(remaining / 5)
                .ok()
                .and_then(|weeks| weeks.checked_mul(7 * step))
                .ok_or(PeriodError::Overflow)?;
            date = add_days(date, days)?;
            remaining %= 5;
            continue;
        }
        date = add_days(date, step)?;
        if !is_weekend(date) {
            remaining -= 1;
        }
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn spec(count: i64, unit: IntervalUnit) -> IntervalSpec {
        IntervalSpec::new(count, unit)
    }

    #[test]
    fn test_parse_interval_forms() {
        assert_eq!(parse_interval("+3d").unwrap(), spec(3, IntervalUnit::Day));
        assert_eq!(parse_interval("-2w").unwrap(), spec(-2, IntervalUnit::Week));
        assert_eq!(parse_interval("14b").unwrap(), spec(14, IntervalUnit::BusinessDay));
        assert_eq!(parse_interval(" {+1h} ").unwrap(), spec(1, IntervalUnit::HalfYear));
        assert_eq!(parse_interval("0y").unwrap(), spec(0, IntervalUnit::Year));

        let chained = parse_offset_markup("{^1b}").unwrap();
        assert!(chained.chained);
        assert_eq!(chained.spec, spec(1, IntervalUnit::BusinessDay));
        assert!(!parse_offset_markup("{-4q}").unwrap().chained);
    }

    #[test]
    fn test_parse_interval_rejects() {
        for text in ["", "v", "14", "+d", "-", "3x", "3D", "^3d", "{3d", "1.5d", "99999999999999999999d"] {
            assert!(
                matches!(parse_interval(text), Err(PeriodError::InvalidInterval(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["+3d", "-2w", "0m", "+1h"] {
            assert_eq!(parse_interval(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_business_days_from_saturday() {
        let saturday = d(2022, 1, 1);
        let expected = [3, 4, 5, 6, 7, 10, 11, 12];
        for (n, day) in expected.iter().enumerate() {
            let got = apply_interval(saturday, spec(n as i64 + 1, IntervalUnit::BusinessDay)).unwrap();
            assert_eq!(got, d(2022, 1, *day), "+{}b", n + 1);
        }
        assert_eq!(
            apply_interval(d(2022, 1, 7), spec(1, IntervalUnit::BusinessDay)).unwrap(),
            d(2022, 1, 10)
        );
    }

    #[test]
    fn test_business_days_backwards() {
        assert_eq!(apply_interval(d(2022, 1, 10), spec(-1, IntervalUnit::BusinessDay)).unwrap(), d(2022, 1, 7));
        assert_eq!(apply_interval(d(2022, 1, 2), spec(-1, IntervalUnit::BusinessDay)).unwrap(), d(2021, 12, 31));
        assert_eq!(apply_interval(d(2022, 1, 12), spec(-8, IntervalUnit::BusinessDay)).unwrap(), d(2021, 12, 31));
        assert_eq!(apply_interval(d(2022, 1, 12), spec(-20, IntervalUnit::BusinessDay)).unwrap(), d(2021, 12, 15));
    }

    #[test]
    fn test_business_days_never_land_on_weekends() {
        let mut base = d(2021, 12, 20);
        while base <= d(2022, 2, 1) {
            for n in 1..=23 {
                let fwd = apply_interval(base, spec(n, IntervalUnit::BusinessDay)).unwrap();
                let back = apply_interval(base, spec(-n, IntervalUnit::BusinessDay)).unwrap();
                assert!(!is_weekend(fwd), "{base} +{n}b -> {fwd}");
                assert!(!is_weekend(back), "{base} -{n}b -> {back}");
                assert!(fwd > base && back < base);
            }
            base = base.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_week_jumps_match_single_steps() {
        let base = d(2022, 3, 9);
        let mut stepped = base;
        for n in 1..=40 {
            stepped = apply_interval(stepped, spec(1, IntervalUnit::BusinessDay)).unwrap();
            assert_eq!(apply_interval(base, spec(n, IntervalUnit::BusinessDay)).unwrap(), stepped);
        }
    }

    #[test]
    fn test_zero_offset_is_identity() {
        let units = [
            IntervalUnit::BusinessDay,
            IntervalUnit::Day,
            IntervalUnit::Week,
            IntervalUnit::Month,
            IntervalUnit::Quarter,
            IntervalUnit::HalfYear,
            IntervalUnit::Year,
        ];
        for base in [d(2022, 1, 1), d(2022, 1, 2), d(2024, 2, 29), d(2022, 6, 15)] {
            for unit in units {
                assert_eq!(apply_interval(base, spec(0, unit)).unwrap(), base);
            }
        }
    }

    #[test]
    fn test_month_units_clamp_to_month_end() {
        assert_eq!(apply_interval(d(2022, 1, 31), spec(1, IntervalUnit::Month)).unwrap(), d(2022, 2, 28));
        assert_eq!(apply_interval(d(2024, 1, 31), spec(1, IntervalUnit::Month)).unwrap(), d(2024, 2, 29));
        assert_eq!(apply_interval(d(2022, 3, 31), spec(-1, IntervalUnit::Month)).unwrap(), d(2022, 2, 28));
        assert_eq!(apply_interval(d(2022, 8, 31), spec(1, IntervalUnit::Quarter)).unwrap(), d(2022, 11, 30));
        assert_eq!(apply_interval(d(2022, 8, 31), spec(1, IntervalUnit::HalfYear)).unwrap(), d(2023, 2, 28));
        assert_eq!(apply_interval(d(2024, 2, 29), spec(1, IntervalUnit::Year)).unwrap(), d(2025, 2, 28));
    }

    #[test]
    fn test_day_and_week_units() {
        assert_eq!(apply_interval(d(2022, 1, 1), spec(364, IntervalUnit::Day)).unwrap(), d(2022, 12, 31));
        assert_eq!(apply_interval(d(2022, 1, 1), spec(-1, IntervalUnit::Day)).unwrap(), d(2021, 12, 31));
        assert_eq!(apply_interval(d(2022, 1, 1), spec(-2, IntervalUnit::Week)).unwrap(), d(2021, 12, 18));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            apply_interval(d(2022, 1, 1), spec(i64::MAX, IntervalUnit::Day)),
            Err(PeriodError::Overflow)
        );
        assert_eq!(
            apply_interval(d(2022, 1, 1), spec(i64::MAX, IntervalUnit::Year)),
            Err(PeriodError::Overflow)
        );
    }

    #[test]
    fn test_unit_classes() {
        assert!(IntervalUnit::Week.is_day_like());
        assert!(!IntervalUnit::Quarter.is_day_like());
        assert_eq!(IntervalUnit::BusinessDay.granularity(), Granularity::Day);
        assert_eq!(IntervalUnit::from_letter('h'), Some(IntervalUnit::HalfYear));
        assert_eq!(IntervalUnit::from_letter('x'), None);
    }
}
