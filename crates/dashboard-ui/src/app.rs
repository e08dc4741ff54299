//! Main application state and TUI event loop for the expense dashboard.
//!
//! [`App`] owns the theme, the selected view, and the report being browsed.
//! The report is computed once before the loop starts; key presses only
//! switch between views.

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame, Terminal,
};

use dashboard_core::formatting::{format_currency_whole, percentage};
use dashboard_data::pipeline::Report;

use crate::chart_view;
use crate::components::header::Header;
use crate::components::status::StatusLine;
use crate::table_view;
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Month × category table and per-category trend.
    Categories,
    /// Month × type table and expense vs investment trend.
    Types,
    /// Full-year category ranking.
    Ranking,
}

impl ViewMode {
    /// Views in tab order.
    pub const ALL: [ViewMode; 3] = [ViewMode::Categories, ViewMode::Types, ViewMode::Ranking];

    /// Parse a `--view` value.
    pub fn from_name(name: &str) -> Option<ViewMode> {
        match name.to_ascii_lowercase().as_str() {
            "categories" => Some(ViewMode::Categories),
            "types" => Some(ViewMode::Types),
            "ranking" => Some(ViewMode::Ranking),
            _ => None,
        }
    }

    /// Tab title.
    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Categories => "Categories",
            ViewMode::Types => "Expense vs Investment",
            ViewMode::Ranking => "Ranking",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> ViewMode {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> ViewMode {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view.
    pub view_mode: ViewMode,
    /// Currency symbol prefixed to every amount.
    pub currency: String,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    report: Report,
}

impl App {
    /// Construct a new application for `report`.
    pub fn new(theme_name: &str, view_mode: ViewMode, currency: String, report: Report) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            currency,
            should_quit: false,
            report,
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the TUI until `q`, `Q`, or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so resizes are
    /// picked up promptly.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('1') => self.view_mode = ViewMode::Categories,
            KeyCode::Char('2') => self.view_mode = ViewMode::Types,
            KeyCode::Char('3') => self.view_mode = ViewMode::Ranking,
            KeyCode::Tab | KeyCode::Right => self.view_mode = self.view_mode.next(),
            KeyCode::BackTab | KeyCode::Left => self.view_mode = self.view_mode.prev(),
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let meta = &self.report.metadata;
        let source = display_source(&meta.source);
        let header = Header::new(&source, meta.sheets_loaded, meta.records_processed, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), chunks[0]);

        frame.render_widget(self.tabs(), chunks[1]);

        if self.report.type_matrix.is_empty() && self.report.category_matrix.is_empty() {
            table_view::render_no_data(frame, chunks[2], &self.theme);
        } else {
            match self.view_mode {
                ViewMode::Categories => self.render_categories(frame, chunks[2]),
                ViewMode::Types => self.render_types(frame, chunks[2]),
                ViewMode::Ranking => chart_view::render_ranking(
                    frame,
                    chunks[2],
                    &self.report.ranking,
                    &self.currency,
                    &self.theme,
                ),
            }
        }

        let status = StatusLine::new(&self.report.warnings, meta.amounts_coerced, &self.theme);
        frame.render_widget(Paragraph::new(status.to_line()), chunks[3]);
    }

    fn tabs(&self) -> Tabs<'static> {
        let titles: Vec<Line> = ViewMode::ALL
            .iter()
            .map(|m| Line::from(format!(" {} {} ", m.index() + 1, m.title())))
            .collect();
        Tabs::new(titles)
            .select(self.view_mode.index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .divider("|")
    }

    fn render_categories(&self, frame: &mut Frame, area: Rect) {
        let matrix = &self.report.category_matrix;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(table_height(matrix.months().len())),
                Constraint::Min(8),
            ])
            .split(area);

        table_view::render_category_table(frame, chunks[0], matrix, &self.currency, &self.theme);
        chart_view::render_category_chart(frame, chunks[1], matrix, &self.theme);
    }

    fn render_types(&self, frame: &mut Frame, area: Rect) {
        let matrix = &self.report.type_matrix;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(table_height(matrix.rows().len())),
                Constraint::Length(1),
                Constraint::Min(8),
            ])
            .split(area);

        table_view::render_type_table(frame, chunks[0], matrix, &self.currency, &self.theme);
        frame.render_widget(Paragraph::new(self.investment_share_line()), chunks[1]);
        chart_view::render_type_chart(frame, chunks[2], matrix, &self.theme);
    }

    /// `"Invested ₹200 of ₹800 (25.0%)"` summary under the type table.
    pub fn investment_share_line(&self) -> Line<'static> {
        let matrix = &self.report.type_matrix;
        let invested = matrix.total_investment();
        let total = matrix.grand_total();
        Line::from(vec![
            Span::styled(" Invested ", self.theme.label),
            Span::styled(format_currency_whole(invested, &self.currency), self.theme.investment),
            Span::styled(" of ", self.theme.label),
            Span::styled(format_currency_whole(total, &self.currency), self.theme.value),
            Span::styled(
                format!(" ({:.1}%)", percentage(invested, total, 1)),
                self.theme.dim,
            ),
        ])
    }
}

/// Rows + header + year row + borders.
fn table_height(rows: usize) -> u16 {
    (rows + 4) as u16
}

/// File name of `source` when it is a path, otherwise `source` unchanged.
fn display_source(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::scenario_report;
    use ratatui::backend::TestBackend;

    fn make_app() -> App {
        App::new("dark", ViewMode::Categories, "₹".to_string(), scenario_report())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── ViewMode ──────────────────────────────────────────────────────────────

    #[test]
    fn test_view_mode_from_name() {
        assert_eq!(ViewMode::from_name("categories"), Some(ViewMode::Categories));
        assert_eq!(ViewMode::from_name("Types"), Some(ViewMode::Types));
        assert_eq!(ViewMode::from_name("RANKING"), Some(ViewMode::Ranking));
        assert_eq!(ViewMode::from_name("daily"), None);
    }

    #[test]
    fn test_view_mode_next_wraps() {
        assert_eq!(ViewMode::Categories.next(), ViewMode::Types);
        assert_eq!(ViewMode::Types.next(), ViewMode::Ranking);
        assert_eq!(ViewMode::Ranking.next(), ViewMode::Categories);
    }

    #[test]
    fn test_view_mode_prev_wraps() {
        assert_eq!(ViewMode::Categories.prev(), ViewMode::Ranking);
        assert_eq!(ViewMode::Ranking.prev(), ViewMode::Types);
        assert_eq!(ViewMode::Types.prev(), ViewMode::Categories);
    }

    // ── App::new ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_defaults() {
        let app = App::new("light", ViewMode::Types, "$".to_string(), scenario_report());
        assert_eq!(app.view_mode, ViewMode::Types);
        assert_eq!(app.currency, "$");
        assert!(!app.should_quit);
        assert_eq!(app.report().metadata.sheets_loaded, 2);
    }

    #[test]
    fn test_app_creation_unknown_theme_falls_back() {
        let app = App::new("neon", ViewMode::Ranking, "₹".to_string(), scenario_report());
        assert!(app.theme.header.fg.is_some());
    }

    // ── handle_key ────────────────────────────────────────────────────────────

    #[test]
    fn test_number_keys_select_view() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.view_mode, ViewMode::Ranking);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.view_mode, ViewMode::Types);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.view_mode, ViewMode::Categories);
    }

    #[test]
    fn test_tab_and_arrows_cycle() {
        let mut app = make_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view_mode, ViewMode::Types);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.view_mode, ViewMode::Ranking);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.view_mode, ViewMode::Types);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.view_mode, ViewMode::Ranking);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = make_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('c'));
        assert!(!app.should_quit);
        assert_eq!(app.view_mode, ViewMode::Categories);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    #[test]
    fn test_investment_share_line() {
        let app = make_app();
        let text: String = app
            .investment_share_line()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, " Invested ₹200 of ₹800 (25.0%)");
    }

    #[test]
    fn test_render_each_view() {
        let mut app = make_app();
        let text = draw(&app, 120, 40);
        assert!(text.contains("FULL-YEAR EXPENSE"), "buffer: {text}");
        assert!(text.contains("expenses.xlsx"), "buffer: {text}");
        assert!(text.contains("Gold Investment"), "buffer: {text}");

        press(&mut app, KeyCode::Char('2'));
        let text = draw(&app, 120, 40);
        assert!(text.contains("Invested ₹200"), "buffer: {text}");

        press(&mut app, KeyCode::Char('3'));
        let text = draw(&app, 120, 40);
        assert!(text.contains("Total Amount: ₹800"), "buffer: {text}");
        assert!(text.contains("All month sheets loaded"), "buffer: {text}");
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let app = make_app();
        draw(&app, 40, 12);
    }

    #[test]
    fn test_display_source_uses_file_name() {
        assert_eq!(display_source("/home/me/Budget 2024.xlsx"), "Budget 2024.xlsx");
        assert_eq!(display_source("memory"), "memory");
    }
}
