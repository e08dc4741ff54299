//! Shared fixtures for the view tests.

use dashboard_core::models::CellValue;
use dashboard_data::loader::{MemoryWorkbook, SheetGrid};
use dashboard_data::pipeline::{build_report, Report};

fn month_grid(rows: &[(&str, f64)]) -> SheetGrid {
    let mut grid = vec![(0..7)
        .map(|i| CellValue::Text(format!("Col{i}")))
        .collect::<Vec<_>>()];
    for (category, amount) in rows {
        let mut row = vec![CellValue::Empty; 5];
        row.push(CellValue::Text(category.to_string()));
        row.push(CellValue::Number(*amount));
        grid.push(row);
    }
    SheetGrid::new(grid)
}

/// January: Grocery 100, Rent 500, Total 600.  March: Gold Investment 200.
pub fn scenario_report() -> Report {
    let mut workbook = MemoryWorkbook::new()
        .with_sheet(
            "January",
            month_grid(&[("Grocery", 100.0), ("Rent", 500.0), ("Total", 600.0)]),
        )
        .with_sheet("March", month_grid(&[("Gold Investment", 200.0)]));
    build_report(&mut workbook, "expenses.xlsx").unwrap()
}
