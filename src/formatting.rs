use yansi::Paint;

/// Color palette for consistent theming
pub struct ColorPalette {
    pub muted: (u8, u8, u8),  // labels, separators
    pub period: (u8, u8, u8), // period identifiers
    pub date: (u8, u8, u8),   // plain dates
    pub header: (u8, u8, u8), // table headers
    pub error: (u8, u8, u8),  // the (error) sentinel
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        muted: (108, 112, 134),  // Gray
        period: (148, 226, 213), // Teal
        date: (137, 180, 250),   // Blue
        header: (249, 226, 175), // Yellow
        error: (243, 139, 168),  // Pink
    };
}

/// Formatting context passed to command output
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    fn paint(&self, text: &str, rgb: (u8, u8, u8), bold: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let (r, g, b) = rgb;
        let painted = Paint::rgb(text, r, g, b);
        if bold { painted.bold().to_string() } else { painted.to_string() }
    }

    pub fn format_period(&self, text: &str) -> String {
        self.paint(text, self.palette.period, true)
    }

    pub fn format_date(&self, text: &str) -> String {
        self.paint(text, self.palette.date, false)
    }

    pub fn format_header(&self, text: &str) -> String {
        self.paint(text, self.palette.header, true)
    }

    pub fn format_muted(&self, text: &str) -> String {
        self.paint(text, self.palette.muted, false)
    }

    pub fn format_error(&self, text: &str) -> String {
        self.paint(text, self.palette.error, true)
    }

    /// Offset results are either an identifier or the error sentinel.
    pub fn format_result(&self, result: &str) -> String {
        if crate::offset::is_offset_error(result) {
            self.format_error(result)
        } else {
            self.format_period(result)
        }
    }

    /// `start .. end` with dim separator.
    pub fn format_range(&self, start: &str, end: &str) -> String {
        format!("{} {} {}", self.format_date(start), self.format_muted(".."), self.format_date(end))
    }
}
