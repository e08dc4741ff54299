//! Currency tables for the month × category and month × type views.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per month plus
//! a highlighted full-year row at the bottom.  Column widths follow the
//! widest rendered cell, measured in display columns.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use dashboard_core::formatting::format_currency_whole;
use dashboard_data::aggregator::{MonthCategoryMatrix, MonthTypeMatrix};

use crate::themes::Theme;

/// Label of the full-year row appended under the month rows.
pub const YEAR_ROW_LABEL: &str = "Year";

/// Formatted cell text for one table, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCells {
    pub header: Vec<String>,
    /// One entry per month: `(label, amounts)`.
    pub rows: Vec<(String, Vec<f64>)>,
    /// Column sums across all months, aligned with `header[1..]`.
    pub totals: Vec<f64>,
}

impl TableCells {
    /// Display width of each column, header and year row included.
    pub fn column_widths(&self, currency: &str) -> Vec<u16> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.width()).collect();
        widths[0] = widths[0].max(YEAR_ROW_LABEL.width());

        let all_rows = self
            .rows
            .iter()
            .map(|(label, values)| (label.as_str(), values.as_slice()))
            .chain(std::iter::once((YEAR_ROW_LABEL, self.totals.as_slice())));

        for (label, values) in all_rows {
            widths[0] = widths[0].max(label.width());
            for (i, v) in values.iter().enumerate() {
                if let Some(w) = widths.get_mut(i + 1) {
                    *w = (*w).max(format_currency_whole(*v, currency).width());
                }
            }
        }

        widths.into_iter().map(|w| w as u16).collect()
    }
}

// ── Cell construction ─────────────────────────────────────────────────────────

/// Month rows × category columns, in the matrix's column order.
pub fn category_table_cells(matrix: &MonthCategoryMatrix) -> TableCells {
    let header = std::iter::once("Month".to_string())
        .chain(matrix.columns().iter().cloned())
        .collect();

    let rows: Vec<(String, Vec<f64>)> = matrix
        .months()
        .iter()
        .map(|m| {
            let values = matrix.row(*m).map(<[f64]>::to_vec).unwrap_or_default();
            (m.name().to_string(), values)
        })
        .collect();

    let totals = column_sums(&rows, matrix.columns().len());
    TableCells {
        header,
        rows,
        totals,
    }
}

/// Month rows × Expense / Investment / Total columns.
pub fn type_table_cells(matrix: &MonthTypeMatrix) -> TableCells {
    let header = ["Month", "Expense", "Investment", "Total"]
        .iter()
        .map(|h| h.to_string())
        .collect();

    let rows: Vec<(String, Vec<f64>)> = matrix
        .rows()
        .iter()
        .map(|r| (r.month.name().to_string(), vec![r.expense, r.investment, r.total]))
        .collect();

    let totals = column_sums(&rows, 3);
    TableCells {
        header,
        rows,
        totals,
    }
}

fn column_sums(rows: &[(String, Vec<f64>)], columns: usize) -> Vec<f64> {
    (0..columns)
        .map(|c| {
            rows.iter()
                .map(|(_, values)| values.get(c).copied().unwrap_or(0.0))
                .sum()
        })
        .collect()
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render `cells` as a currency table into `area`.
pub fn render_currency_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    cells: &TableCells,
    currency: &str,
    theme: &Theme,
) {
    let header = Row::new(
        cells
            .header
            .iter()
            .map(|h| Cell::from(h.clone()).style(theme.table_header)),
    )
    .height(1);

    let data_rows: Vec<Row> = cells
        .rows
        .iter()
        .enumerate()
        .map(|(i, (label, values))| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let amounts = values.iter().map(|v| {
                Cell::from(format_currency_whole(*v, currency)).style(theme.amount_style(*v, style))
            });
            Row::new(std::iter::once(Cell::from(label.clone())).chain(amounts)).style(style)
        })
        .collect();

    // Full-year row, styled separately to stand out.
    let total_row = Row::new(
        std::iter::once(Cell::from(YEAR_ROW_LABEL))
            .chain(
                cells
                    .totals
                    .iter()
                    .map(|v| Cell::from(format_currency_whole(*v, currency))),
            ),
    )
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths: Vec<Constraint> = cells
        .column_widths(currency)
        .into_iter()
        .map(Constraint::Length)
        .collect();

    let table = Table::new(all_rows, widths)
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the month × category table.
pub fn render_category_table(
    frame: &mut Frame,
    area: Rect,
    matrix: &MonthCategoryMatrix,
    currency: &str,
    theme: &Theme,
) {
    let cells = category_table_cells(matrix);
    render_currency_table(frame, area, "Month-wise Category Totals", &cells, currency, theme);
}

/// Render the month × type table.
pub fn render_type_table(
    frame: &mut Frame,
    area: Rect,
    matrix: &MonthTypeMatrix,
    currency: &str,
    theme: &Theme,
) {
    let cells = type_table_cells(matrix);
    render_currency_table(frame, area, "Expense vs Investment", &cells, currency, theme);
}

/// Render a "no data" placeholder when the workbook produced no rows.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No expense rows found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Month sheets need a category in column F and an amount in column G.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Expense Dashboard "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
