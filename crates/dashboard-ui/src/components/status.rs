use crate::themes::Theme;
use dashboard_data::loader::SheetWarning;
use ratatui::text::{Line, Span};

/// Key bindings shown at the right of the status line.
pub const KEY_HINTS: &str = "1/2/3 view · ←/→ cycle · q quit";

// ── StatusLine ───────────────────────────────────────────────────────────────

/// Bottom status line reporting what the loader skipped or coerced.
///
/// | State                        | Format                                      |
/// |------------------------------|---------------------------------------------|
/// | clean                        | `✓ All month sheets loaded`                 |
/// | one warning                  | `⚠ <warning message>`                       |
/// | several warnings             | `⚠ 3 sheets skipped: <first message> (+2)` |
///
/// A `· N non-numeric amounts counted as 0` suffix is added when any amount
/// cell was coerced.
pub struct StatusLine<'a> {
    pub warnings: &'a [SheetWarning],
    /// Amount cells that were not numbers and counted as zero.
    pub amounts_coerced: usize,
    pub theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    /// Construct a new status line.
    pub fn new(warnings: &'a [SheetWarning], amounts_coerced: usize, theme: &'a Theme) -> Self {
        Self {
            warnings,
            amounts_coerced,
            theme,
        }
    }

    /// Human-readable summary of the loader warnings.
    pub fn message(&self) -> String {
        match self.warnings {
            [] => "✓ All month sheets loaded".to_string(),
            [only] => format!("⚠ {only}"),
            [first, rest @ ..] => format!(
                "⚠ {} sheets skipped: {} (+{})",
                self.warnings.len(),
                first,
                rest.len()
            ),
        }
    }

    /// Render the status as a [`Line`].
    pub fn to_line(&self) -> Line<'a> {
        let style = if self.warnings.is_empty() {
            self.theme.success
        } else {
            self.theme.warning
        };

        let mut spans = vec![Span::styled(self.message(), style)];

        if self.amounts_coerced > 0 {
            spans.push(Span::styled(
                format!(
                    " · {} non-numeric amount{} counted as 0",
                    self.amounts_coerced,
                    if self.amounts_coerced == 1 { "" } else { "s" }
                ),
                self.theme.warning,
            ));
        }

        spans.push(Span::styled(format!("   {KEY_HINTS}"), self.theme.dim));
        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
