use chrono::NaiveDate;

/// Signed whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Describe `date` relative to `today`: "tomorrow", "in 3 weeks",
/// "2 months ago", ...
pub fn describe_relative(date: NaiveDate, today: NaiveDate) -> String {
    let diff = days_between(today, date);
    match diff {
        0 => return "today".to_string(),
        1 => return "tomorrow".to_string(),
        -1 => return "yesterday".to_string(),
        _ => {}
    }

    let days = diff.unsigned_abs();
    let (n, unit) = if days < 14 {
        (days, "day")
    } else if days < 60 {
        (days / 7, "week")
    } else if days < 365 {
        (days / 30, "month")
    } else {
        (days / 365, "year")
    };
    let amount = if n == 1 { format!("1 {unit}") } else { format!("{n} {unit}s") };

    if diff > 0 { format!("in {amount}") } else { format!("{amount} ago") }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(d(2022, 1, 1), d(2022, 12, 31)), 364);
        assert_eq!(days_between(d(2022, 1, 1), d(2021, 12, 31)), -1);
    }

    #[test]
    fn test_describe_relative() {
        let today = d(2022, 3, 15);
        assert_eq!(describe_relative(today, today), "today");
        assert_eq!(describe_relative(d(2022, 3, 16), today), "tomorrow");
        assert_eq!(describe_relative(d(2022, 3, 14), today), "yesterday");
        assert_eq!(describe_relative(d(2022, 3, 20), today), "in 5 days");
        assert_eq!(describe_relative(d(2022, 3, 5), today), "10 days ago");
        assert_eq!(describe_relative(d(2022, 4, 5), today), "in 3 weeks");
        assert_eq!(describe_relative(d(2022, 7, 1), today), "in 3 months");
        assert_eq!(describe_relative(d(2021, 3, 1), today), "1 year ago");
        assert_eq!(describe_relative(d(2025, 3, 15), today), "in 3 years");
    }
}
