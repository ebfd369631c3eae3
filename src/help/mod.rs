use std::error::Error;

use crate::terminal_columns;

mod content;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Command,
    Guide,
    Environment,
}

impl Section {
    fn label(self) -> &'static str {
        match self {
            Section::Command => "Commands",
            Section::Guide => "Guides",
            Section::Environment => "Environment",
        }
    }

    const ORDER: [Section; 3] = [Section::Command, Section::Guide, Section::Environment];
}

#[derive(Clone, Copy)]
pub(crate) struct HelpFlag<'a> {
    pub name: &'a str,
    pub desc: &'a str,
}

#[derive(Clone, Copy)]
pub(crate) struct HelpTopic<'a> {
    pub name: &'a str,
    pub summary: &'a str,
    pub usage: &'a str,
    pub details: &'a [&'a str],
    pub flags: &'a [HelpFlag<'a>],
    pub aliases: &'a [&'a str],
    pub section: Section,
    pub examples: &'a [&'a str],
}

#[derive(Clone, Copy)]
pub(crate) struct HelpBook<'a> {
    pub title: &'a str,
    pub usage: &'a str,
    pub topics: &'a [HelpTopic<'a>],
    pub footer: &'a [&'a str],
}

impl<'a> HelpBook<'a> {
    fn find(&self, name: &str) -> Option<&HelpTopic<'a>> {
        self.topics.iter().find(|topic| {
            topic.name.eq_ignore_ascii_case(name)
                || topic.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
        })
    }
}

pub(crate) fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    for line in render(args.first().map(String::as_str)) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn render(topic: Option<&str>) -> Vec<String> {
    let book = content::book();
    let printer = HelpPrinter { width: terminal_columns().unwrap_or(96).clamp(64, 120) };
    match topic {
        None => printer.overview(&book),
        Some(name) => match book.find(name) {
            Some(entry) => printer.topic(&book, entry),
            None => {
                eprintln!("Unknown help topic: {name}");
                printer.overview(&book)
            }
        },
    }
}

struct HelpPrinter {
    width: usize,
}

impl HelpPrinter {
    fn overview(&self, book: &HelpBook<'_>) -> Vec<String> {
        let mut out = vec![book.title.to_string(), format!("usage: {}", book.usage), String::new()];
        for section in Section::ORDER {
            let rows: Vec<(String, String)> = book
                .topics
                .iter()
                .filter(|t| t.section == section)
                .map(|t| {
                    let label = if section == Section::Guide { t.name } else { t.usage };
                    (label.to_string(), t.summary.to_string())
                })
                .collect();
            out.extend(self.block(section.label(), &rows));
        }
        self.push_footer(book, &mut out);
        out
    }

    fn topic(&self, book: &HelpBook<'_>, topic: &HelpTopic<'_>) -> Vec<String> {
        let mut out = vec![format!("{} - {}", topic.name, topic.summary), format!("usage: {}", topic.usage)];
        if !topic.aliases.is_empty() {
            out.push(format!("aliases: {}", topic.aliases.join(", ")));
        }
        out.push(String::new());

        for line in topic.details {
            out.extend(wrap(line, self.width));
        }
        if !topic.details.is_empty() {
            out.push(String::new());
        }

        let flags: Vec<(String, String)> =
            topic.flags.iter().map(|f| (f.name.to_string(), f.desc.to_string())).collect();
        out.extend(self.block("Options", &flags));

        if !topic.examples.is_empty() {
            out.push("Examples:".to_string());
            out.extend(topic.examples.iter().map(|ex| format!("  {ex}")));
            out.push(String::new());
        }
        self.push_footer(book, &mut out);
        out
    }

    fn block(&self, title: &str, rows: &[(String, String)]) -> Vec<String> {
        if rows.is_empty() {
            return Vec::new();
        }
        let label_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).min(self.width / 2);
        let desc_width = self.width.saturating_sub(label_width + 4).max(24);

        let mut out = vec![format!("{title}:")];
        for (label, desc) in rows {
            let labels = wrap(label, label_width);
            let descs = wrap(desc, desc_width);
            for idx in 0..labels.len().max(descs.len()) {
                let l = labels.get(idx).map(String::as_str).unwrap_or("");
                let d = descs.get(idx).map(String::as_str).unwrap_or("");
                out.push(format!("  {l:label_width$}  {d}").trim_end().to_string());
            }
        }
        out.push(String::new());
        out
    }

    fn push_footer(&self, book: &HelpBook<'_>, out: &mut Vec<String>) {
        for line in book.footer {
            out.extend(wrap(line, self.width));
        }
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            out.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() || out.is_empty() {
        out.push(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_lists_every_section() {
        let lines = render(None);
        assert_eq!(lines[0], "Note Dates");
        for label in ["Commands:", "Guides:", "Environment:"] {
            assert!(lines.iter().any(|l| l == label), "{label}");
        }
        assert!(lines.iter().any(|l| l.contains("nd offset <period> <interval>")));
    }

    #[test]
    fn test_topic_lookup_by_alias() {
        let lines = render(Some("calc"));
        assert!(lines[0].starts_with("offset - "));
        assert!(lines.iter().any(|l| l.contains("--strict")));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("", 10), vec![""]);
    }
}
