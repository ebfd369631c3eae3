use super::{HelpBook, HelpFlag, HelpTopic, Section};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "Note Dates",
        usage: "nd <command> [options]",
        topics: ALL_TOPICS,
        footer: &["Use `nd help <topic>` for focused docs, e.g. `nd help offset` or `nd help markup`."],
    }
}

const MODE_FLAG: HelpFlag<'static> = HelpFlag {
    name: "-m, --mode <mode>",
    desc: "Output size: same (default), week, offset, shorter or longer.",
};

const ALL_TOPICS: &[HelpTopic<'static>] = &[
    HelpTopic {
        name: "offset",
        summary: "Move a period identifier by an interval.",
        usage: "nd offset <period> <interval> [-m mode] [--strict]",
        details: &[
            "Periods: 2022-01-31, 20220131, 2022-W05, 2022-01, 2022-Q1, 2022H1, 2022; a teamspace folder prefix and .md/.txt extension are kept.",
            "Intervals: optional sign, a count and one of b (business day), d, w, m, q, h (half-year), y. Braced markup like {+3d} is accepted.",
            "The interval is applied to the first day of the period. Failures print (error) unless --strict is given.",
        ],
        flags: &[
            MODE_FLAG,
            HelpFlag { name: "--strict", desc: "Report the underlying error and exit non-zero instead of printing (error)." },
        ],
        aliases: &["calc"],
        section: Section::Command,
        examples: &["nd offset 2022-01-01 +5b", "nd offset 2022-Q2 -2q", "nd offset 2024-11-02 +1w -m week"],
    },
    HelpTopic {
        name: "week",
        summary: "Week identifier and Sunday-Saturday range of a date.",
        usage: "nd week [date]",
        details: &["Defaults to today. Weeks start on Sunday; see `nd help weeks-guide` for numbering rules."],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["nd week 2022-01-01"],
    },
    HelpTopic {
        name: "range",
        summary: "First and last day of any period identifier.",
        usage: "nd range <period>",
        details: &[],
        flags: &[],
        aliases: &["bounds"],
        section: Section::Command,
        examples: &["nd range 2022-Q3", "nd range 2026-W53"],
    },
    HelpTopic {
        name: "weeks",
        summary: "Table of every numbered week in a year.",
        usage: "nd weeks [year]",
        details: &["Defaults to the current year. Rows are cut to the terminal width."],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["nd weeks 2026"],
    },
    HelpTopic {
        name: "week-offset",
        summary: "Step a (week, year) pair by whole weeks.",
        usage: "nd week-offset <week> <year> <offset>",
        details: &["Every year is stepped as 52 weeks, matching the weekly summary indexes."],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["nd week-offset 52 2021 1", "nd week-offset 1 2021 -1"],
    },
    HelpTopic {
        name: "expand",
        summary: "Replace {+3d} style markup in a note with scheduled dates.",
        usage: "nd expand [file|-] [-i]",
        details: &[
            "Reads the file (or stdin) and prints the expanded note; a summary goes to stderr.",
            "See `nd help markup` for how base dates are chosen.",
        ],
        flags: &[HelpFlag { name: "-i, --in-place", desc: "Rewrite the file instead of printing it." }],
        aliases: &[],
        section: Section::Command,
        examples: &["nd expand project.md", "cat project.md | nd expand"],
    },
    HelpTopic {
        name: "relative",
        summary: "Describe a date relative to today.",
        usage: "nd relative <date>",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["nd relative 2022-12-25"],
    },
    HelpTopic {
        name: "help",
        summary: "Show this overview or a single topic.",
        usage: "nd help [topic]",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &[],
    },
    HelpTopic {
        name: "markup",
        summary: "How offset markup in notes is evaluated.",
        usage: "nd help markup",
        details: &[
            "A line that contains a YYYY-MM-DD date sets the base date for its own markup and the lines after it; before that, today is the base.",
            "{+3d} and {-2w} count from the base; {^1b} counts from the date the previous markup produced.",
            "Dates written as >YYYY-MM-DD are scheduling links and never become the base. Code spans and code blocks are left alone.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Guide,
        examples: &["printf '# Launch 2022-03-01\\n- venue {-2w}\\n' | nd expand"],
    },
    HelpTopic {
        name: "weeks-guide",
        summary: "Week numbering used for YYYY-Wnn identifiers.",
        usage: "nd help weeks-guide",
        details: &[
            "Weeks run Sunday to Saturday and take the number of their Wednesday, counted from the first Thursday of that Wednesday's year.",
            "1 January can belong to the previous year's last week. Years starting on a Thursday begin at week 2.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Guide,
        examples: &[],
    },
    HelpTopic {
        name: "NOTE_DATES_TODAY",
        summary: "Pin today to a YYYY-MM-DD date.",
        usage: "NOTE_DATES_TODAY=2022-01-01 nd ...",
        details: &["Used for every default base date; handy for reproducible scripts."],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "NOTE_DATES_LOG",
        summary: "Diagnostic filter, e.g. debug (default warn).",
        usage: "NOTE_DATES_LOG=debug nd ...",
        details: &["Diagnostics go to stderr."],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "NO_COLOR",
        summary: "Disable colored output.",
        usage: "NO_COLOR=1 nd ...",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
];
