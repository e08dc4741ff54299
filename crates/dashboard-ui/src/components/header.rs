use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Title shown on the first header line.
pub const TITLE: &str = "FULL-YEAR EXPENSE & INVESTMENT DASHBOARD";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Workbook information in `[ source | N sheets | M records ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Workbook name as shown to the user (usually the file name).
    pub source: &'a str,
    /// Number of month sheets that were aggregated.
    pub sheets_loaded: usize,
    /// Number of rows that reached the aggregator.
    pub records: usize,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(source: &'a str, sheets_loaded: usize, records: usize, theme: &'a Theme) -> Self {
        Self {
            source,
            sheets_loaded,
            records,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    ///
    /// The returned lines are:
    ///
    /// 1. `"✦ ✧ ✦ ✧ FULL-YEAR EXPENSE & INVESTMENT DASHBOARD ✦ ✧ ✦ ✧"`
    /// 2. `"============================================================"` (60 `=` chars)
    /// 3. `"[ expenses.xlsx | 12 sheets | 240 records ]"`
    /// 4. `""`
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(format!(" {TITLE} "), self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source.to_string(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    plural(self.sheets_loaded, "sheet", "sheets"),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(plural(self.records, "record", "records"), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
