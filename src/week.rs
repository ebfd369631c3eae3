//! Week numbering and calendar-period boundaries.
//!
//! Weeks run Sunday through Saturday. A week is numbered by its Wednesday
//! measured against the first Thursday of that Wednesday's year, which is
//! ISO-8601 shifted back by one day. Consequences worth knowing:
//! - 1 January can belong to the previous year's last week (52 or 53);
//! - in years starting on a Thursday, 1-3 January report the previous year's
//!   last week and 4 January opens week 2, so those years have no week 1.
//!
//! Identifiers are parsed permissively: any week in 1..=53 is accepted, even
//! one the numbering never assigns (`2026-W01`, `2022-W53`). Such a week is
//! placed by whole-week offset from the year's first numbered week, so it
//! re-serializes as its neighbour (`2025-W53`, `2023-W01`).

use chrono::{Datelike, Days, NaiveDate};
use tracing::warn;

use crate::error::{PeriodError, PeriodResult};

/// A (week, year) pair as used by week-indexed summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekIndex {
    pub week: u32,
    pub year: i32,
}

/// Week number (1..=53) of `date`.
pub fn week_number_of(date: NaiveDate) -> u32 {
    let target = wednesday_of(date);
    let diff = (target - first_thursday(target.year())).num_days();
    // diff >= -6, so the result is at least 1
    (1 + ceil_div(diff, 7)) as u32
}

/// Year that `week_number_of(date)` counts in.
pub fn week_year_of(date: NaiveDate) -> i32 {
    wednesday_of(date).year()
}

pub fn week_of(date: NaiveDate) -> WeekIndex {
    WeekIndex { week: week_number_of(date), year: week_year_of(date) }
}

/// Sunday on or before `date`.
pub fn sunday_of(date: NaiveDate) -> NaiveDate {
    shift(date, -i64::from(date.weekday().num_days_from_sunday()))
}

/// First and last day (Sunday, Saturday) of `week` in `year`.
///
/// Week numbers outside 1..=53 are not rejected: the range is extrapolated
/// from the year's first numbered week and a warning is logged.
pub fn week_start_end(week: i32, year: i32) -> (NaiveDate, NaiveDate) {
    if !(1..=53).contains(&week) {
        warn!(week, year, "week number outside 1..=53, extrapolating");
    }
    let (anchor, anchor_week) = first_numbered_week(year);
    let start = shift(anchor, (i64::from(week) - i64::from(anchor_week)) * 7);
    (start, shift(start, 6))
}

/// Every numbered week of `year` with its Sunday-Saturday range.
pub fn numbered_weeks(year: i32) -> Vec<(u32, NaiveDate, NaiveDate)> {
    let (_, first) = first_numbered_week(year);
    (first..=weeks_in_year(year))
        .map(|week| {
            let (start, end) = week_start_end(week as i32, year);
            (week, start, end)
        })
        .collect()
}

/// Highest week number assigned to a day of `year` that counts in `year`.
pub fn weeks_in_year(year: i32) -> u32 {
    (25..=31)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, 12, day))
        .filter(|d| week_year_of(*d) == year)
        .map(week_number_of)
        .max()
        .unwrap_or(52)
}

pub fn month_start_end(month: u32, year: i32) -> PeriodResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(PeriodError::out_of_range("month", month));
    }
    span_of_months(year, month, 1)
}

pub fn quarter_start_end(quarter: u32, year: i32) -> PeriodResult<(NaiveDate, NaiveDate)> {
    if !(1..=4).contains(&quarter) {
        return Err(PeriodError::out_of_range("quarter", quarter));
    }
    span_of_months(year, quarter * 3 - 2, 3)
}

pub fn half_year_start_end(half: u32, year: i32) -> PeriodResult<(NaiveDate, NaiveDate)> {
    if !(1..=2).contains(&half) {
        return Err(PeriodError::out_of_range("half", half));
    }
    span_of_months(year, half * 6 - 5, 6)
}

pub fn year_start_end(year: i32) -> PeriodResult<(NaiveDate, NaiveDate)> {
    span_of_months(year, 1, 12)
}

/// Move a week index by whole weeks, treating every year as 52 weeks long.
///
/// Years with 53 numbered weeks are not accounted for; callers that index
/// summaries by this helper rely on the fixed 52-week stride.
pub fn calc_week_offset(start_week: i32, start_year: i32, offset: i32) -> WeekIndex {
    let idx = i64::from(start_week) + i64::from(offset) - 1;
    let year = i64::from(start_year) + idx.div_euclid(52);
    WeekIndex {
        week: (idx.rem_euclid(52) + 1) as u32,
        year: i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX }),
    }
}

fn span_of_months(year: i32, first_month: u32, months: u32) -> PeriodResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, first_month, 1).ok_or(PeriodError::Overflow)?;
    let end = start
        .checked_add_months(chrono::Months::new(months))
        .and_then(|next| next.pred_opt())
        .ok_or(PeriodError::Overflow)?;
    Ok((start, end))
}

// Sunday of the earliest week counted in `year`, and its number (1, or 2 in
// years that have no week 1).
fn first_numbered_week(year: i32) -> (NaiveDate, u32) {
    (1..=7)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, 1, day))
        .map(|d| (d, week_number_of(d)))
        .find(|(_, week)| *week <= 2)
        .map(|(d, week)| (sunday_of(d), week))
        // only reachable at chrono's calendar bounds, never for 4-digit years
        .unwrap_or((NaiveDate::MIN, 1))
}

fn wednesday_of(date: NaiveDate) -> NaiveDate {
    shift(sunday_of(date), 3)
}

fn first_thursday(year: i32) -> NaiveDate {
    let Some(jan1) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return NaiveDate::MIN;
    };
    let dow = jan1.weekday().num_days_from_sunday();
    shift(jan1, i64::from((11 - dow) % 7))
}

// Saturates at chrono's calendar bounds instead of panicking.
fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    let moved = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    moved.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

fn ceil_div(a: i64, b: i64) -> i64 {
    -(-a).div_euclid(b)
}
