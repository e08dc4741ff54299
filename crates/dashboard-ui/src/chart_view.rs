//! Trend charts and the full-year ranking view.
//!
//! Line charts plot one point per month present in the data, with months on
//! the x axis (calendar index) and whole-currency amounts on the y axis.  The
//! ranking view draws one [`RankingBar`] per category, largest at the top.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use dashboard_core::formatting::{format_compact, format_currency_whole};
use dashboard_core::models::{EntryType, Month};
use dashboard_data::aggregator::{CategoryRanking, MonthCategoryMatrix, MonthTypeMatrix};

use crate::components::ranking_bar::{RankingBar, RankingBarConfig};
use crate::themes::Theme;

/// Number of labels placed along the y axis.
const Y_LABELS: usize = 5;

/// One line series ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    /// `(month index, amount)` points in calendar order.
    pub points: Vec<(f64, f64)>,
    pub style: Style,
}

// ── Series construction ───────────────────────────────────────────────────────

fn to_points(series: &[(Month, f64)]) -> Vec<(f64, f64)> {
    series.iter().map(|(m, v)| (m.index() as f64, *v)).collect()
}

/// One series per category column, in the matrix's column order.
pub fn category_series(matrix: &MonthCategoryMatrix, theme: &Theme) -> Vec<ChartSeries> {
    matrix
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| ChartSeries {
            name: column.clone(),
            points: to_points(&matrix.column_series(column)),
            style: theme.series_style(i),
        })
        .collect()
}

/// Expense and investment series.
pub fn type_series(matrix: &MonthTypeMatrix, theme: &Theme) -> Vec<ChartSeries> {
    vec![
        ChartSeries {
            name: EntryType::Expense.label().to_string(),
            points: to_points(&matrix.expense_series()),
            style: theme.type_style(EntryType::Expense),
        },
        ChartSeries {
            name: EntryType::Investment.label().to_string(),
            points: to_points(&matrix.investment_series()),
            style: theme.type_style(EntryType::Investment),
        },
    ]
}

// ── Axes ──────────────────────────────────────────────────────────────────────

/// X bounds and evenly spaced month labels covering `months`.
///
/// Every calendar month between the first and last present month gets a
/// label so that labels line up with integer x positions.  A single month is
/// centred between two blank labels.
pub fn month_axis(months: &[Month]) -> ([f64; 2], Vec<String>) {
    let (Some(first), Some(last)) = (months.iter().min(), months.iter().max()) else {
        return (
            [0.0, 11.0],
            Month::ALL.iter().map(|m| m.short_name().to_string()).collect(),
        );
    };

    if first == last {
        let i = first.index() as f64;
        return (
            [i - 1.0, i + 1.0],
            vec![String::new(), first.short_name().to_string(), String::new()],
        );
    }

    let labels = Month::ALL[first.index()..=last.index()]
        .iter()
        .map(|m| m.short_name().to_string())
        .collect();
    ([first.index() as f64, last.index() as f64], labels)
}

/// Y bounds and compact labels for the given data range.
///
/// The lower bound is never above zero; a flat all-zero range gets `[0, 1]`.
pub fn amount_axis(min: f64, max: f64) -> ([f64; 2], Vec<String>) {
    let low = min.min(0.0);
    let high = if max > low { max } else { low + 1.0 };
    let step = (high - low) / (Y_LABELS - 1) as f64;
    let labels = (0..Y_LABELS)
        .map(|i| format_compact(low + step * i as f64))
        .collect();
    ([low, high], labels)
}

fn series_range(series: &[ChartSeries]) -> (f64, f64) {
    series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, y)| *y))
        .fold((0.0_f64, 0.0_f64), |(lo, hi), y| (lo.min(y), hi.max(y)))
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render `series` as a line chart into `area`.
pub fn render_line_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    months: &[Month],
    series: &[ChartSeries],
    theme: &Theme,
) {
    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(s.style)
                .data(&s.points)
        })
        .collect();

    let (x_bounds, x_labels) = month_axis(months);
    let (y_min, y_max) = series_range(series);
    let (y_bounds, y_labels) = amount_axis(y_min, y_max);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .x_axis(
            Axis::default()
                .style(theme.axis)
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds(y_bounds)
                .labels(y_labels),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .style(theme.text);

    frame.render_widget(chart, area);
}

/// Render the per-category trend chart.
pub fn render_category_chart(
    frame: &mut Frame,
    area: Rect,
    matrix: &MonthCategoryMatrix,
    theme: &Theme,
) {
    let series = category_series(matrix, theme);
    render_line_chart(
        frame,
        area,
        "Trend: Monthly Category-wise Breakdown",
        matrix.months(),
        &series,
        theme,
    );
}

/// Render the expense vs investment trend chart.
pub fn render_type_chart(frame: &mut Frame, area: Rect, matrix: &MonthTypeMatrix, theme: &Theme) {
    let months: Vec<Month> = matrix.rows().iter().map(|r| r.month).collect();
    let series = type_series(matrix, theme);
    render_line_chart(
        frame,
        area,
        "Trend: Expense vs Investment",
        &months,
        &series,
        theme,
    );
}

/// Build the ranking bar lines, largest category first.
///
/// `width` is the inner width available; the label column takes the widest
/// category name (capped at a third of the width) and the bar takes what is
/// left after the value label.
pub fn ranking_lines<'a>(
    ranking: &'a CategoryRanking,
    currency: &'a str,
    width: u16,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let label_width = ranking
        .entries()
        .iter()
        .map(|e| e.category.width())
        .max()
        .unwrap_or(0)
        .min((width / 3) as usize)
        .max(1);

    let value_width = ranking
        .entries()
        .iter()
        .map(|e| format_currency_whole(e.amount, currency).width())
        .max()
        .unwrap_or(0);

    // Label, " │", bar, " " + value.
    let bar_width = (width as usize)
        .saturating_sub(label_width + 2 + 1 + value_width)
        .max(1) as u16;

    let max_amount = ranking.max_amount();

    ranking
        .entries()
        .iter()
        .rev()
        .map(|e| {
            RankingBar::new(&e.category, e.amount, max_amount, currency, theme)
                .with_config(RankingBarConfig {
                    width: bar_width,
                    label_width,
                    ..RankingBarConfig::default()
                })
                .to_line()
        })
        .collect()
}

/// Render the full-year ranking into `area`.
pub fn render_ranking(
    frame: &mut Frame,
    area: Rect,
    ranking: &CategoryRanking,
    currency: &str,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(" Expenses by Category (Full Year) ");

    let mut lines = ranking_lines(ranking, currency, area.width.saturating_sub(2), theme);
    if lines.is_empty() {
        lines.push(Line::from(Span::styled("No categories to rank", theme.dim)));
    } else {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Total Amount: ", theme.label),
            Span::styled(
                format_currency_whole(ranking.grand_total(), currency),
                theme.value,
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::scenario_report;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    // ── Series ────────────────────────────────────────────────────────────────

    #[test]
    fn test_category_series_follows_columns() {
        let theme = Theme::dark();
        let report = scenario_report();
        let series = category_series(&report.category_matrix, &theme);

        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Grocery", "Rent", "Gold Investment", "Total"]);
        // January is index 0, March index 2.
        assert_eq!(series[0].points, vec![(0.0, 100.0), (2.0, 0.0)]);
        assert_eq!(series[2].points, vec![(0.0, 0.0), (2.0, 200.0)]);
        assert_eq!(series[1].style, theme.series_style(1));
    }

    #[test]
    fn test_type_series() {
        let theme = Theme::dark();
        let report = scenario_report();
        let series = type_series(&report.type_matrix, &theme);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "Expense");
        assert_eq!(series[0].points, vec![(0.0, 600.0), (2.0, 0.0)]);
        assert_eq!(series[1].name, "Investment");
        assert_eq!(series[1].points, vec![(0.0, 0.0), (2.0, 200.0)]);
        assert_eq!(series[1].style, theme.investment);
    }

    #[test]
    fn test_series_range_spans_every_series_and_zero() {
        let theme = Theme::dark();
        let report = scenario_report();
        let series = category_series(&report.category_matrix, &theme);
        assert_eq!(series_range(&series), (0.0, 600.0));

        let refund = vec![ChartSeries {
            name: "Refund".to_string(),
            points: vec![(0.0, -50.0), (1.0, 80.0)],
            style: theme.series_style(0),
        }];
        assert_eq!(series_range(&refund), (-50.0, 80.0));
        assert_eq!(series_range(&[]), (0.0, 0.0));
    }

    // ── Axes ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_month_axis_spans_first_to_last() {
        let (bounds, labels) = month_axis(&[Month::January, Month::March]);
        assert_eq!(bounds, [0.0, 2.0]);
        assert_eq!(labels, vec!["Jan", "Feb", "Mar"]);
    }

    #[test]
    fn test_month_axis_single_month() {
        let (bounds, labels) = month_axis(&[Month::June]);
        assert_eq!(bounds, [4.0, 6.0]);
        assert_eq!(labels, vec!["", "Jun", ""]);
    }

    #[test]
    fn test_month_axis_empty_is_full_year() {
        let (bounds, labels) = month_axis(&[]);
        assert_eq!(bounds, [0.0, 11.0]);
        assert_eq!(labels.len(), 12);
    }

    #[test]
    fn test_amount_axis_positive_range() {
        let (bounds, labels) = amount_axis(0.0, 4_000.0);
        assert_eq!(bounds, [0.0, 4_000.0]);
        assert_eq!(labels, vec!["0", "1.0k", "2.0k", "3.0k", "4.0k"]);
    }

    #[test]
    fn test_amount_axis_includes_negative() {
        let (bounds, _) = amount_axis(-200.0, 600.0);
        assert_eq!(bounds, [-200.0, 600.0]);
    }

    #[test]
    fn test_amount_axis_all_zero() {
        let (bounds, labels) = amount_axis(0.0, 0.0);
        assert_eq!(bounds, [0.0, 1.0]);
        assert_eq!(labels.len(), Y_LABELS);
    }

    // ── Ranking ───────────────────────────────────────────────────────────────

    #[test]
    fn test_ranking_lines_largest_first() {
        let theme = Theme::dark();
        let report = scenario_report();
        let lines = ranking_lines(&report.ranking, "₹", 80, &theme);

        assert_eq!(lines.len(), 3);
        assert!(line_text(&lines[0]).starts_with("Rent"));
        assert!(line_text(&lines[0]).ends_with("₹500"));
        assert!(line_text(&lines[2]).starts_with("Grocery"));
        assert!(line_text(&lines[2]).ends_with("₹100"));
    }

    #[test]
    fn test_ranking_lines_fit_width() {
        let theme = Theme::dark();
        let report = scenario_report();
        for line in ranking_lines(&report.ranking, "₹", 50, &theme) {
            assert!(line.width() <= 50, "line too wide: {}", line_text(&line));
        }
    }

    #[test]
    fn test_ranking_lines_empty() {
        let theme = Theme::dark();
        let ranking = CategoryRanking::default();
        assert!(ranking_lines(&ranking, "₹", 80, &theme).is_empty());
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_charts_do_not_panic() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let report = scenario_report();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_category_chart(frame, area, &report.category_matrix, &theme);
            })
            .unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_type_chart(frame, area, &report.type_matrix, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_empty_chart_does_not_panic() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_category_chart(frame, area, &MonthCategoryMatrix::default(), &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_ranking_shows_values() {
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let report = scenario_report();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_ranking(frame, area, &report.ranking, "₹", &theme);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("₹200"), "buffer: {text}");
        assert!(text.contains("Total Amount: ₹800"), "buffer: {text}");
    }
}
