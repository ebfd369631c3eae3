//! Table and text layout helpers used by the CLI.
//! Widths are measured on visible characters so colored cells line up.

/// Render a text table. Column widths come from the widest cell (header or
/// row); every rendered line is cut to `max_width` visible columns when given.
pub fn render_table(headers: &[String], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| display_len(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(display_len(cell));
        }
    }

    let fit = |line: String| match max_width {
        Some(w) if display_len(&line) > w => truncate_with_ellipsis(&strip_ansi(&line), w),
        _ => line,
    };

    let header_line = format_row(headers, &widths);
    let rule = "-".repeat(display_len(&header_line));
    let mut lines = vec![fit(header_line), fit(rule)];
    lines.extend(rows.iter().map(|row| fit(format_row(row, &widths))));
    lines.join("\n")
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    row.iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let padding = width.saturating_sub(display_len(cell));
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let len = text.chars().count();
    if len <= max_width {
        return text.to_string();
    }
    let mut out = text.chars().take(max_width - 1).collect::<String>();
    out.push('…');
    out
}

/// Visible length of a string, ignoring ANSI escape sequences.
pub fn display_len(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}
