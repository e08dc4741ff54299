//! Month × category, month × type, and full-year category aggregation.
//!
//! Every view is a grouped sum recomputed from the normalized records; cells
//! with no contributing record read as `0.0`.

use std::collections::{BTreeMap, BTreeSet};

use dashboard_core::models::{EntryType, Month, NormalizedRecord};
use serde::Serialize;

// ── MonthCategoryMatrix ───────────────────────────────────────────────────────

/// Summed amount per (month, category) with dense zero fill.
///
/// Rows are the months that have at least one record, in calendar order.
/// Columns are trimmed category labels; rows labelled "total" are kept here.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MonthCategoryMatrix {
    months: Vec<Month>,
    columns: Vec<String>,
    /// `cells[row][col]`, aligned with `months` and `columns`.
    cells: Vec<Vec<f64>>,
}

impl MonthCategoryMatrix {
    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Summed amount for one cell; `0.0` when the month or column is absent.
    pub fn get(&self, month: Month, column: &str) -> f64 {
        let row = self.months.iter().position(|m| *m == month);
        let col = self.columns.iter().position(|c| c == column);
        match (row, col) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => 0.0,
        }
    }

    /// Row values aligned with [`Self::columns`].
    pub fn row(&self, month: Month) -> Option<&[f64]> {
        self.months
            .iter()
            .position(|m| *m == month)
            .map(|r| self.cells[r].as_slice())
    }

    /// `(month, amount)` points for one column, one per matrix row.
    pub fn column_series(&self, column: &str) -> Vec<(Month, f64)> {
        self.months
            .iter()
            .map(|m| (*m, self.get(*m, column)))
            .collect()
    }

    /// A new matrix holding the listed columns in the listed order.
    ///
    /// Names not present in this matrix are skipped; values are carried over
    /// unchanged.
    pub fn reorder_columns(&self, order: &[String]) -> MonthCategoryMatrix {
        let indices: Vec<usize> = order
            .iter()
            .filter_map(|name| self.columns.iter().position(|c| c == name))
            .collect();

        MonthCategoryMatrix {
            months: self.months.clone(),
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            cells: self
                .cells
                .iter()
                .map(|row| indices.iter().map(|&i| row[i]).collect())
                .collect(),
        }
    }
}

// ── MonthTypeMatrix ───────────────────────────────────────────────────────────

/// Expense, investment and combined totals for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTypeRow {
    pub month: Month,
    pub expense: f64,
    pub investment: f64,
    /// Always `expense + investment`.
    pub total: f64,
}

/// Per-month expense / investment sums, calendar ordered.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MonthTypeMatrix {
    rows: Vec<MonthTypeRow>,
}

impl MonthTypeMatrix {
    pub fn rows(&self) -> &[MonthTypeRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, month: Month) -> Option<&MonthTypeRow> {
        self.rows.iter().find(|r| r.month == month)
    }

    pub fn expense_series(&self) -> Vec<(Month, f64)> {
        self.rows.iter().map(|r| (r.month, r.expense)).collect()
    }

    pub fn investment_series(&self) -> Vec<(Month, f64)> {
        self.rows.iter().map(|r| (r.month, r.investment)).collect()
    }

    /// Sum of the `total` column across all months.
    pub fn grand_total(&self) -> f64 {
        self.rows.iter().map(|r| r.total).sum()
    }

    /// Sum of the `investment` column across all months.
    pub fn total_investment(&self) -> f64 {
        self.rows.iter().map(|r| r.investment).sum()
    }
}

// ── CategoryRanking ───────────────────────────────────────────────────────────

/// One category's full-year sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCategory {
    /// Display label (first spelling seen in the data).
    pub category: String,
    pub amount: f64,
}

/// Full-year sums per category, ascending by amount, "total" excluded.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategoryRanking {
    entries: Vec<RankedCategory>,
}

impl CategoryRanking {
    pub fn entries(&self) -> &[RankedCategory] {
        &self.entries
    }

    pub fn max_amount(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.amount)
            .fold(0.0_f64, f64::max)
    }

    pub fn grand_total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }
}

// ── Aggregator ────────────────────────────────────────────────────────────────

/// Stateless helper that reduces normalized records into the three views.
pub struct Aggregator;

impl Aggregator {
    /// Sum amounts by (month, trimmed category).  No category is excluded.
    ///
    /// Columns come out in lexicographic order; use
    /// [`crate::ordering::order_columns`] for presentation order.
    pub fn by_month_category(records: &[NormalizedRecord]) -> MonthCategoryMatrix {
        let months: Vec<Month> = records
            .iter()
            .map(|r| r.month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let columns: Vec<String> = records
            .iter()
            .map(|r| r.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let col_index: BTreeMap<&str, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut cells = vec![vec![0.0; columns.len()]; months.len()];
        for record in records {
            // Both lookups succeed: the index sets were built from `records`.
            if let (Ok(r), Some(&c)) = (
                months.binary_search(&record.month),
                col_index.get(record.category.as_str()),
            ) {
                cells[r][c] += record.amount;
            }
        }

        MonthCategoryMatrix {
            months,
            columns,
            cells,
        }
    }

    /// Sum amounts by (month, type) after dropping "total" rows, adding a
    /// per-month `total = expense + investment`.
    pub fn by_month_type(records: &[NormalizedRecord]) -> MonthTypeMatrix {
        let mut sums: BTreeMap<Month, (f64, f64)> = BTreeMap::new();

        for record in records.iter().filter(|r| !r.is_total_row()) {
            let slot = sums.entry(record.month).or_insert((0.0, 0.0));
            match record.entry_type {
                EntryType::Expense => slot.0 += record.amount,
                EntryType::Investment => slot.1 += record.amount,
            }
        }

        MonthTypeMatrix {
            rows: sums
                .into_iter()
                .map(|(month, (expense, investment))| MonthTypeRow {
                    month,
                    expense,
                    investment,
                    total: expense + investment,
                })
                .collect(),
        }
    }

    /// Sum amounts per category key over the whole year, drop "total", sort
    /// ascending by amount.  Ties keep key order.
    pub fn category_ranking(records: &[NormalizedRecord]) -> CategoryRanking {
        let mut groups: BTreeMap<&str, RankedCategory> = BTreeMap::new();

        for record in records.iter().filter(|r| !r.is_total_row()) {
            groups
                .entry(record.key.as_str())
                .or_insert_with(|| RankedCategory {
                    category: record.category.clone(),
                    amount: 0.0,
                })
                .amount += record.amount;
        }

        let mut entries: Vec<RankedCategory> = groups.into_values().collect();
        entries.sort_by(|a, b| a.amount.total_cmp(&b.amount));

        CategoryRanking { entries }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::category_key;

    use crate::classifier::classify;

    fn rec(month: Month, category: &str, amount: f64) -> NormalizedRecord {
        let key = category_key(category);
        NormalizedRecord {
            category: category.trim().to_string(),
            entry_type: classify(&key),
            key,
            amount,
            month,
        }
    }

    fn scenario() -> Vec<NormalizedRecord> {
        vec![
            rec(Month::January, "Grocery", 100.0),
            rec(Month::January, "Rent", 500.0),
            rec(Month::January, "Total", 600.0),
            rec(Month::March, "Gold Investment", 200.0),
        ]
    }

    // ── by_month_category ─────────────────────────────────────────────────────

    #[test]
    fn test_month_category_scenario() {
        let m = Aggregator::by_month_category(&scenario());

        assert_eq!(m.months(), &[Month::January, Month::March]);
        assert_eq!(m.get(Month::January, "Grocery"), 100.0);
        assert_eq!(m.get(Month::January, "Rent"), 500.0);
        assert_eq!(m.get(Month::January, "Total"), 600.0);
        assert_eq!(m.get(Month::January, "Gold Investment"), 0.0);
        assert_eq!(m.get(Month::March, "Gold Investment"), 200.0);
        assert_eq!(m.get(Month::March, "Rent"), 0.0);
    }

    #[test]
    fn test_month_category_columns_sorted() {
        let m = Aggregator::by_month_category(&scenario());
        assert_eq!(m.columns(), &["Gold Investment", "Grocery", "Rent", "Total"]);
    }

    #[test]
    fn test_month_category_sums_duplicates() {
        let records = vec![
            rec(Month::May, "Food", 10.0),
            rec(Month::May, "Food", 15.5),
            rec(Month::May, "Food", 0.0),
        ];
        let m = Aggregator::by_month_category(&records);
        assert_eq!(m.get(Month::May, "Food"), 25.5);
    }

    #[test]
    fn test_month_category_rows_in_calendar_order() {
        let records = vec![
            rec(Month::December, "Food", 1.0),
            rec(Month::February, "Food", 2.0),
            rec(Month::July, "Food", 3.0),
        ];
        let m = Aggregator::by_month_category(&records);
        assert_eq!(m.months(), &[Month::February, Month::July, Month::December]);
        assert_eq!(
            m.column_series("Food"),
            vec![
                (Month::February, 2.0),
                (Month::July, 3.0),
                (Month::December, 1.0)
            ]
        );
    }

    #[test]
    fn test_month_category_empty() {
        let m = Aggregator::by_month_category(&[]);
        assert!(m.is_empty());
    }

    #[test]
    fn test_reorder_columns_keeps_values() {
        let m = Aggregator::by_month_category(&scenario());
        let order: Vec<String> = ["Total", "Rent", "Missing", "Grocery", "Gold Investment"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let reordered = m.reorder_columns(&order);

        assert_eq!(
            reordered.columns(),
            &["Total", "Rent", "Grocery", "Gold Investment"]
        );
        for month in m.months() {
            for column in m.columns() {
                assert_eq!(reordered.get(*month, column), m.get(*month, column));
            }
        }
        assert_eq!(reordered.row(Month::January), Some(&[600.0, 500.0, 100.0, 0.0][..]));
    }

    // ── by_month_type ─────────────────────────────────────────────────────────

    #[test]
    fn test_month_type_scenario() {
        let t = Aggregator::by_month_type(&scenario());

        let jan = t.get(Month::January).unwrap();
        assert_eq!(jan.expense, 600.0);
        assert_eq!(jan.investment, 0.0);
        assert_eq!(jan.total, 600.0);

        let mar = t.get(Month::March).unwrap();
        assert_eq!(mar.expense, 0.0);
        assert_eq!(mar.investment, 200.0);
        assert_eq!(mar.total, 200.0);
    }

    #[test]
    fn test_month_type_total_equals_sum() {
        let records = vec![
            rec(Month::June, "Food", 120.25),
            rec(Month::June, "Stocks Investment", 1_000.0),
            rec(Month::August, "gold investment", 50.0),
            rec(Month::August, "Rent", 700.0),
        ];
        let t = Aggregator::by_month_type(&records);
        for row in t.rows() {
            assert_eq!(row.total, row.expense + row.investment);
        }
        assert_eq!(t.grand_total(), 1_870.25);
        assert_eq!(t.total_investment(), 1_050.0);
    }

    #[test]
    fn test_month_type_excludes_total_rows_in_any_case() {
        let records = vec![
            rec(Month::May, "Food", 10.0),
            rec(Month::May, "TOTAL", 999.0),
            rec(Month::May, " total ", 999.0),
        ];
        let t = Aggregator::by_month_type(&records);
        assert_eq!(t.get(Month::May).unwrap().total, 10.0);
    }

    #[test]
    fn test_month_type_month_with_only_total_row_absent() {
        let records = vec![
            rec(Month::January, "Total", 5.0),
            rec(Month::February, "Food", 5.0),
        ];
        let t = Aggregator::by_month_type(&records);
        assert!(t.get(Month::January).is_none());
        assert_eq!(t.rows().len(), 1);
    }

    #[test]
    fn test_month_type_calendar_order_regardless_of_input() {
        let records = vec![
            rec(Month::November, "Food", 1.0),
            rec(Month::January, "Food", 1.0),
            rec(Month::June, "Food", 1.0),
        ];
        let t = Aggregator::by_month_type(&records);
        let months: Vec<Month> = t.rows().iter().map(|r| r.month).collect();
        assert_eq!(months, vec![Month::January, Month::June, Month::November]);
        assert_eq!(t.expense_series().len(), 3);
        assert!(t.investment_series().iter().all(|(_, v)| *v == 0.0));
    }

    // ── category_ranking ──────────────────────────────────────────────────────

    #[test]
    fn test_ranking_scenario() {
        let ranking = Aggregator::category_ranking(&scenario());
        let labels: Vec<(&str, f64)> = ranking
            .entries()
            .iter()
            .map(|e| (e.category.as_str(), e.amount))
            .collect();
        assert_eq!(
            labels,
            vec![("Grocery", 100.0), ("Gold Investment", 200.0), ("Rent", 500.0)]
        );
    }

    #[test]
    fn test_ranking_excludes_total_any_casing() {
        let records = vec![
            rec(Month::May, "Total", 1.0),
            rec(Month::June, "TOTAL", 2.0),
            rec(Month::July, "total", 3.0),
            rec(Month::July, "Food", 4.0),
        ];
        let ranking = Aggregator::category_ranking(&records);
        assert_eq!(ranking.entries().len(), 1);
        assert_eq!(ranking.entries()[0].category, "Food");
    }

    #[test]
    fn test_ranking_merges_case_variants_across_months() {
        let records = vec![
            rec(Month::January, "Food", 10.0),
            rec(Month::February, "food", 20.0),
            rec(Month::March, "FOOD ", 30.0),
        ];
        let ranking = Aggregator::category_ranking(&records);
        assert_eq!(ranking.entries().len(), 1);
        assert_eq!(ranking.entries()[0].category, "Food");
        assert_eq!(ranking.entries()[0].amount, 60.0);
    }

    #[test]
    fn test_ranking_sorted_ascending() {
        let records = vec![
            rec(Month::May, "Travel", 300.0),
            rec(Month::May, "Loan", 50.0),
            rec(Month::May, "Shopping", 120.0),
        ];
        let ranking = Aggregator::category_ranking(&records);
        let amounts: Vec<f64> = ranking.entries().iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![50.0, 120.0, 300.0]);
        assert_eq!(ranking.max_amount(), 300.0);
        assert_eq!(ranking.grand_total(), 470.0);
    }

    #[test]
    fn test_ranking_ties_keep_key_order() {
        let records = vec![
            rec(Month::May, "Travel", 10.0),
            rec(Month::May, "Family", 10.0),
        ];
        let ranking = Aggregator::category_ranking(&records);
        assert_eq!(ranking.entries()[0].category, "Family");
        assert_eq!(ranking.entries()[1].category, "Travel");
    }
}
