//! Expansion of inline offset markup (`{+3d}`, `{-2w}`, `{^1b}`) in note
//! text into scheduled-date links (`>2022-01-04`).
//!
//! Plain offsets count from the current base date: the first ISO date on the
//! most recent line that has one, or today before any such line. A dated line
//! is its own base, so `Kickoff 2022-03-01 prep {-1d}` counts from the
//! kickoff. Chained offsets (`{^...}`) count from the date the previous markup
//! produced.

use chrono::NaiveDate;
use pulldown_cmark::{Event, Parser, Tag};
use regex::{Match, Regex};
use std::ops::Range;
use std::sync::OnceLock;
use tracing::debug;

use crate::clock::Clock;
use crate::interval::{apply_interval, parse_offset_markup};
use crate::period::Period;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    /// Markup replaced by a date.
    pub replaced: usize,
    /// Markup left in place because it could not be evaluated.
    pub errors: usize,
}

pub fn expand_offsets(text: &str, clock: &dyn Clock) -> Expansion {
    let code = code_regions(text);
    let mut base = clock.today();
    let mut last: Option<NaiveDate> = None;
    let mut out = String::with_capacity(text.len());
    let mut replaced = 0;
    let mut errors = 0;
    let mut line_start = 0;

    for line in text.split_inclusive('\n') {
        let offset = line_start;
        line_start += line.len();

        if let Some(date) = base_date_in(line, offset, &code) {
            debug!(%date, "base date");
            base = date;
            last = None;
        }

        let markups: Vec<Match<'_>> = markup_re()
            .find_iter(line)
            .filter(|m| !in_regions(&code, offset + m.start()))
            .collect();
        if markups.is_empty() {
            out.push_str(line);
            continue;
        }

        let mut cursor = 0;
        for m in markups {
            out.push_str(&line[cursor..m.start()]);
            cursor = m.end();

            let evaluated = parse_offset_markup(m.as_str()).and_then(|markup| {
                let from = if markup.chained { last.unwrap_or(base) } else { base };
                apply_interval(from, markup.spec)
            });
            match evaluated {
                Ok(date) => {
                    out.push('>');
                    out.push_str(&Period::Day(date).to_string());
                    last = Some(date);
                    replaced += 1;
                }
                Err(err) => {
                    debug!(markup = m.as_str(), error = %err, "left markup in place");
                    out.push_str(m.as_str());
                    errors += 1;
                }
            }
        }
        out.push_str(&line[cursor..]);
    }

    Expansion { text: out, replaced, errors }
}

fn markup_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\^?[+-]?\d+[A-Za-z]\}").expect("valid regex"))
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("valid regex"))
}

// First valid date on the line that is neither code nor a `>date` link.
fn base_date_in(line: &str, offset: usize, code: &[Range<usize>]) -> Option<NaiveDate> {
    date_re().captures_iter(line).find_map(|caps| {
        let whole = caps.get(0)?;
        if in_regions(code, offset + whole.start()) || line[..whole.start()].ends_with('>') {
            return None;
        }
        NaiveDate::from_ymd_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
    })
}

/// Byte ranges of inline code spans and code blocks.
fn code_regions(text: &str) -> Vec<Range<usize>> {
    Parser::new(text)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Code(_) | Event::Start(Tag::CodeBlock(_)) => Some(range),
            _ => None,
        })
        .collect()
}

fn in_regions(regions: &[Range<usize>], pos: usize) -> bool {
    regions.iter().any(|r| r.contains(&pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap())
    }

    #[test]
    fn test_expand_from_heading_date() {
        let text = "# Launch plan 2022-03-01\n- book venue {-2w}\n- send invites {^3b}\n- retro {+1m}\n";
        let exp = expand_offsets(text, &clock());
        assert_eq!(
            exp.text,
            "# Launch plan 2022-03-01\n- book venue >2022-02-15\n- send invites >2022-02-18\n- retro >2022-04-01\n"
        );
        assert_eq!(exp.replaced, 3);
        assert_eq!(exp.errors, 0);
    }

    #[test]
    fn test_today_is_base_without_dates() {
        let exp = expand_offsets("- call back {+1b}\n- follow up {^1w}", &clock());
        assert_eq!(exp.text, "- call back >2022-01-03\n- follow up >2022-01-10");
    }

    #[test]
    fn test_chain_starts_from_base() {
        let exp = expand_offsets("## 2022-06-10\n- prep {^2d}\n", &clock());
        assert_eq!(exp.text, "## 2022-06-10\n- prep >2022-06-12\n");
    }

    #[test]
    fn test_new_base_resets_chain() {
        let text = "2022-03-01\n- a {+1d}\n2022-05-01\n- b {^1d}\n";
        let exp = expand_offsets(text, &clock());
        assert_eq!(exp.text, "2022-03-01\n- a >2022-03-02\n2022-05-01\n- b >2022-05-02\n");
    }

    #[test]
    fn test_scheduled_links_do_not_move_base() {
        let text = "Plan 2022-03-01\n- done >2022-05-05\n- next {+1d}\n";
        let exp = expand_offsets(text, &clock());
        assert!(exp.text.ends_with("- next >2022-03-02\n"));
    }

    #[test]
    fn test_dated_line_with_markup_sets_base() {
        let text = "Kickoff 2022-03-01 prep {-1d}\n- next {+1d}\n- then {^1d}\n";
        let exp = expand_offsets(text, &clock());
        assert_eq!(
            exp.text,
            "Kickoff 2022-03-01 prep >2022-02-28\n- next >2022-03-02\n- then >2022-03-03\n"
        );
        assert_eq!(exp.replaced, 3);
    }

    #[test]
    fn test_expanded_links_on_markup_lines_are_ignored() {
        let text = "2022-03-01\n- a >2022-09-09 b {+1d}\n";
        let exp = expand_offsets(text, &clock());
        assert_eq!(exp.text, "2022-03-01\n- a >2022-09-09 b >2022-03-02\n");
    }

    #[test]
    fn test_several_markups_on_one_line() {
        let exp = expand_offsets("2022-03-01\nfrom {+1d} to {^2d}\n", &clock());
        assert_eq!(exp.text, "2022-03-01\nfrom >2022-03-02 to >2022-03-04\n");
        assert_eq!(exp.replaced, 2);
    }

    #[test]
    fn test_invalid_markup_left_alone() {
        let exp = expand_offsets("- odd {+3x} and {+2d}\n", &clock());
        assert_eq!(exp.text, "- odd {+3x} and >2022-01-03\n");
        assert_eq!(exp.errors, 1);
        assert_eq!(exp.replaced, 1);
    }

    #[test]
    fn test_code_is_untouched() {
        let text = "Use `{+1d}` inline\n\n```\n- sample {+2d}\n2030-01-01\n```\n\n- real {+2d}\n";
        let exp = expand_offsets(text, &clock());
        assert!(exp.text.contains("`{+1d}`"));
        assert!(exp.text.contains("- sample {+2d}"));
        assert!(exp.text.contains("- real >2022-01-03"));
        assert_eq!(exp.replaced, 1);
    }

    #[test]
    fn test_no_markup_is_identity() {
        let text = "plain note\nwith 2022-02-02 date\n";
        let exp = expand_offsets(text, &clock());
        assert_eq!(exp.text, text);
        assert_eq!(exp.replaced, 0);
    }
}
