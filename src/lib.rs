use chrono::{Datelike, NaiveDate};
use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use tracing::debug;

pub mod args;
pub mod clock;
pub mod config;
pub mod error;
pub mod formatting;
mod help;
pub mod interval;
pub mod logging;
pub mod markup;
pub mod offset;
pub mod period;
pub mod relative;
pub mod shared;
pub mod week;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{ConfigError, PeriodError, PeriodResult};
pub use interval::{IntervalSpec, IntervalUnit, OffsetMarkup, apply_interval, parse_interval, parse_offset_markup};
pub use markup::{Expansion, expand_offsets};
pub use offset::{OFFSET_ERROR_SENTINEL, OutputMode, calc_offset, calc_offset_date, calc_offset_date_str};
pub use period::{DayStyle, Granularity, Period, PeriodIdentifier, parse_period_identifier};
pub use relative::{days_between, describe_relative};
pub use week::{WeekIndex, calc_week_offset, week_of, week_start_end};

use args::parse_command_flags;
use formatting::FormatContext;
use shared::table::render_table;

pub fn entry() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    logging::init(&config.log_filter);

    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        return help::run(Vec::new());
    }

    let cmd = args.remove(0);
    let ctx = FormatContext::new(config.use_color);
    let clock = config.clock();

    match cmd.as_str() {
        "offset" | "calc" => offset_cmd(args, &ctx)?,
        "week" => week_cmd(args, clock.as_ref(), &ctx)?,
        "range" | "bounds" => range_cmd(args, &ctx)?,
        "weeks" => weeks_cmd(args, clock.as_ref(), &ctx)?,
        "week-offset" => week_offset_cmd(args, &ctx)?,
        "expand" => expand_cmd(args, clock.as_ref())?,
        "relative" => relative_cmd(args, clock.as_ref())?,
        "help" | "--help" | "-h" => help::run(args)?,
        other => {
            eprintln!("Unknown command: {other}");
            help::run(Vec::new())?;
        }
    }

    Ok(())
}

/// Terminal width in columns, when stdout is a terminal.
pub(crate) fn terminal_columns() -> Option<usize> {
    terminal_size::terminal_size().map(|(width, _)| width.0 as usize)
}

fn offset_cmd(args: Vec<String>, ctx: &FormatContext) -> Result<(), Box<dyn Error>> {
    const USAGE: &str = "Usage: nd offset <period> <interval> [-m mode] [--strict]";
    let flags = parse_command_flags(args, "offset")?;
    let base = flags.positional(0, USAGE)?;
    let interval = flags.positional(1, USAGE)?;

    if flags.strict {
        let result = calc_offset(base, interval, flags.mode)?;
        println!("{}", ctx.format_period(&result.to_string()));
    } else {
        println!("{}", ctx.format_result(&calc_offset_date_str(base, interval, flags.mode)));
    }
    Ok(())
}

fn week_cmd(args: Vec<String>, clock: &dyn Clock, ctx: &FormatContext) -> Result<(), Box<dyn Error>> {
    let flags = parse_command_flags(args, "week")?;
    let date = match flags.positional.first() {
        Some(raw) => parse_day(raw)?,
        None => clock.today(),
    };
    let WeekIndex { week, year } = week_of(date);
    let period = Period::Week { year, week };
    let (start, end) = week_start_end(week as i32, year);
    println!(
        "{}  {}",
        ctx.format_period(&period.to_string()),
        ctx.format_range(&start.to_string(), &end.to_string())
    );
    Ok(())
}

fn range_cmd(args: Vec<String>, ctx: &FormatContext) -> Result<(), Box<dyn Error>> {
    let flags = parse_command_flags(args, "range")?;
    let raw = flags.positional(0, "Usage: nd range <period>")?;
    let ident = parse_period_identifier(raw)?;
    let (start, end) = ident.period.bounds()?;
    println!(
        "{}  {}",
        ctx.format_period(&ident.period.to_string()),
        ctx.format_range(&start.to_string(), &end.to_string())
    );
    Ok(())
}

fn weeks_cmd(args: Vec<String>, clock: &dyn Clock, ctx: &FormatContext) -> Result<(), Box<dyn Error>> {
    let flags = parse_command_flags(args, "weeks")?;
    let year = match flags.positional.first() {
        Some(raw) => parse_number::<i32>(raw, "year")?,
        None => clock.today().year(),
    };

    let headers: Vec<String> =
        ["Week", "Start", "End"].iter().map(|h| ctx.format_header(h)).collect();
    let rows: Vec<Vec<String>> = week::numbered_weeks(year)
        .into_iter()
        .map(|(week, start, end)| {
            vec![
                ctx.format_period(&Period::Week { year, week }.to_string()),
                ctx.format_date(&start.to_string()),
                ctx.format_date(&end.to_string()),
            ]
        })
        .collect();
    println!("{}", render_table(&headers, &rows, terminal_columns()));
    Ok(())
}

fn week_offset_cmd(args: Vec<String>, ctx: &FormatContext) -> Result<(), Box<dyn Error>> {
    const USAGE: &str = "Usage: nd week-offset <week> <year> <offset>";
    let flags = parse_command_flags(args, "week-offset")?;
    let week = parse_number::<i32>(flags.positional(0, USAGE)?, "week")?;
    let year = parse_number::<i32>(flags.positional(1, USAGE)?, "year")?;
    let offset = parse_number::<i32>(flags.positional(2, USAGE)?, "offset")?;

    let WeekIndex { week, year } = calc_week_offset(week, year, offset);
    println!("{}", ctx.format_period(&Period::Week { year, week }.to_string()));
    Ok(())
}

fn expand_cmd(args: Vec<String>, clock: &dyn Clock) -> Result<(), Box<dyn Error>> {
    let flags = parse_command_flags(args, "expand")?;
    let path = flags.positional.first().filter(|p| p.as_str() != "-");
    if flags.in_place && path.is_none() {
        return Err("--in-place needs a file path".into());
    }

    let input = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("Failed to read {path}: {e}"))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let expansion = expand_offsets(&input, clock);
    match path {
        Some(path) if flags.in_place => {
            if expansion.text != input {
                fs::write(path, &expansion.text)?;
                debug!(path = path.as_str(), "rewrote note");
            }
        }
        _ => print!("{}", expansion.text),
    }

    eprintln!(
        "Expanded {} offset(s){}",
        expansion.replaced,
        if expansion.errors > 0 { format!(", {} left unchanged", expansion.errors) } else { String::new() }
    );
    Ok(())
}

fn relative_cmd(args: Vec<String>, clock: &dyn Clock) -> Result<(), Box<dyn Error>> {
    let flags = parse_command_flags(args, "relative")?;
    let date = parse_day(flags.positional(0, "Usage: nd relative <date>")?)?;
    println!("{}", describe_relative(date, clock.today()));
    Ok(())
}

/// A day identifier (`2022-01-31` or `20220131`) as a date.
fn parse_day(raw: &str) -> Result<NaiveDate, Box<dyn Error>> {
    match parse_period_identifier(raw)?.period {
        Period::Day(date) => Ok(date),
        other => Err(format!("Expected a day, got a {} ({raw})", other.granularity()).into()),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, Box<dyn Error>> {
    raw.parse::<T>().map_err(|_| format!("Invalid {what}: {raw}").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_accepts_both_day_styles() {
        let expected = NaiveDate::from_ymd_opt(2022, 1, 31).unwrap();
        assert_eq!(parse_day("2022-01-31").unwrap(), expected);
        assert_eq!(parse_day("20220131").unwrap(), expected);
    }

    #[test]
    fn test_parse_day_rejects_wider_periods() {
        let err = parse_day("2022-Q1").unwrap_err().to_string();
        assert!(err.contains("quarter"), "{err}");
        assert!(parse_day("not-a-date").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<i32>("-3", "offset").unwrap(), -3);
        let err = parse_number::<i32>("x", "week").unwrap_err().to_string();
        assert_eq!(err, "Invalid week: x");
    }
}
