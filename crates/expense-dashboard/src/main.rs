mod bootstrap;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_data::pipeline::{analyze_workbook, Report};
use dashboard_ui::app::{App, ViewMode};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Expense Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "File: {}, View: {}, Theme: {}, Format: {}",
        settings.file.display(),
        settings.view,
        settings.theme,
        settings.format
    );

    // Nothing is rendered unless the whole pipeline succeeds.
    let report = analyze_workbook(&settings.file)?;

    match settings.format.as_str() {
        "json" => println!("{}", render_json(&report)?),
        _ => {
            let view_mode = ViewMode::from_name(&settings.view).unwrap_or(ViewMode::Categories);
            let app = App::new(&settings.theme, view_mode, settings.currency.clone(), report);
            app.run().context("terminal UI failed")?;
        }
    }

    Ok(())
}

/// Pretty-printed JSON for `--format json`.
fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("serializing report")
}

// ── Tests ──────────────────────────────────────────────────────────────────────
