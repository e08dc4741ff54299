use crate::themes::Theme;
use dashboard_core::formatting::format_currency_whole;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Configuration controlling visual appearance of a ranking bar.
pub struct RankingBarConfig {
    /// Width in terminal columns of the longest bar (excluding labels).
    pub width: u16,
    /// Character used to draw the bar.
    pub filled_char: char,
    /// Terminal columns reserved for the category label.
    pub label_width: usize,
}

impl Default for RankingBarConfig {
    fn default() -> Self {
        Self {
            width: 40,
            filled_char: '\u{2588}', // █  FULL BLOCK
            label_width: 20,
        }
    }
}

// ── RankingBar ───────────────────────────────────────────────────────────────

/// One horizontal bar of the full-year category ranking.
///
/// Renders as `"<label> │█████████ ₹12,345"`: the label padded to a fixed
/// display width, a bar proportional to `amount / max_amount`, and the
/// whole-unit currency value at the bar's end.  Negative amounts draw an
/// empty bar but keep their signed value label.
pub struct RankingBar<'a> {
    pub label: &'a str,
    pub amount: f64,
    /// Largest amount in the ranking; the bar for it spans the full width.
    pub max_amount: f64,
    pub currency: &'a str,
    pub theme: &'a Theme,
    pub config: RankingBarConfig,
}

impl<'a> RankingBar<'a> {
    /// Construct a new bar with default configuration.
    pub fn new(
        label: &'a str,
        amount: f64,
        max_amount: f64,
        currency: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            label,
            amount,
            max_amount,
            currency,
            theme,
            config: RankingBarConfig::default(),
        }
    }

    /// Override the configuration.
    pub fn with_config(mut self, config: RankingBarConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of filled cells for this bar.
    pub fn filled_cells(&self) -> usize {
        if self.max_amount <= 0.0 || self.amount <= 0.0 {
            return 0;
        }
        let ratio = (self.amount / self.max_amount).min(1.0);
        (ratio * self.config.width as f64).round() as usize
    }

    /// Render the bar as a [`Line`].
    pub fn to_line(&self) -> Line<'a> {
        let bar: String = std::iter::repeat_n(self.config.filled_char, self.filled_cells()).collect();

        Line::from(vec![
            Span::styled(
                fit_label(self.label, self.config.label_width),
                self.theme.label,
            ),
            Span::styled(" │", self.theme.separator),
            Span::styled(bar, self.theme.bar),
            Span::styled(
                format!(" {}", format_currency_whole(self.amount, self.currency)),
                self.theme.amount_style(self.amount, self.theme.bar_value),
            ),
        ])
    }
}

/// Pad or truncate `label` to exactly `width` display columns.
pub fn fit_label(label: &str, width: usize) -> String {
    let display = label.width();
    if display <= width {
        return format!("{}{}", label, " ".repeat(width - display));
    }

    // Truncate with an ellipsis, counting display columns not bytes.
    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
