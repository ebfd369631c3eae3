//! Settings taken from the environment.
//!
//! - `NOTE_DATES_TODAY`: pin "today" to a `YYYY-MM-DD` date
//! - `NOTE_DATES_LOG`: tracing filter directives (default `warn`)
//! - `NO_COLOR`: disable colored output

use chrono::NaiveDate;

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::error::ConfigError;

pub const TODAY_VAR: &str = "NOTE_DATES_TODAY";
pub const LOG_VAR: &str = "NOTE_DATES_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub today: Option<NaiveDate>,
    pub log_filter: String,
    pub use_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { today: None, log_filter: DEFAULT_LOG_FILTER.to_string(), use_color: true }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let today = match lookup(TODAY_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(
                |source| ConfigError::InvalidDate { var: TODAY_VAR, value: raw.clone(), source },
            )?),
            None => None,
        };
        let log_filter = lookup(LOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let use_color = lookup("NO_COLOR").is_none();

        Ok(Self { today, log_filter, use_color })
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_pinned_today() {
        let config = Config::from_lookup(lookup(&[
            ("NOTE_DATES_TODAY", "2022-01-01"),
            ("NOTE_DATES_LOG", "debug"),
            ("NO_COLOR", "1"),
        ]))
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert_eq!(config.today, Some(today));
        assert_eq!(config.clock().today(), today);
        assert_eq!(config.log_filter, "debug");
        assert!(!config.use_color);
    }

    #[test]
    fn test_invalid_today() {
        let err = Config::from_lookup(lookup(&[("NOTE_DATES_TODAY", "01/02/2022")])).unwrap_err();
        assert!(err.to_string().contains("NOTE_DATES_TODAY"));
    }
}
