//! Presentation order for the month × category matrix columns.
//!
//! Known categories follow [`PREFERRED_CATEGORY_ORDER`]; anything else is
//! spliced in just before the "emergency fund" column, or appended when that
//! column is absent.  Matching goes through [`category_key`], the same key the
//! aggregator groups on.

use dashboard_core::models::category_key;

/// Canonical column order, by category key.
pub const PREFERRED_CATEGORY_ORDER: [&str; 15] = [
    "grocery",
    "travel",
    "food",
    "rent",
    "loan",
    "shopping",
    "recharge bill payments",
    "family",
    "credit card",
    "health care",
    "insurance",
    "emergency fund",
    "gold investment",
    "stocks investment",
    "total",
];

/// Unrecognised categories are inserted before this key.
pub const SPLICE_ANCHOR: &str = "emergency fund";

/// Order `columns` for display using the default preference list.
///
/// The result is always a permutation of `columns`.
pub fn order_columns<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    order_columns_with(columns, &PREFERRED_CATEGORY_ORDER, SPLICE_ANCHOR)
}

/// Order `columns` by an explicit preference list and splice anchor.
///
/// Columns whose keys collide (e.g. `"Food"` and `"food "`) are all kept, in
/// their input order, at their shared preference slot.
pub fn order_columns_with<S: AsRef<str>>(
    columns: &[S],
    preference: &[&str],
    anchor: &str,
) -> Vec<String> {
    let keyed: Vec<(String, &str)> = columns
        .iter()
        .map(|c| (category_key(c.as_ref()), c.as_ref()))
        .collect();

    let known: Vec<(&str, &str)> = preference
        .iter()
        .flat_map(|pref| {
            keyed
                .iter()
                .filter(move |(key, _)| key == pref)
                .map(move |(_, original)| (*pref, *original))
        })
        .collect();

    let others: Vec<&str> = keyed
        .iter()
        .filter(|(key, _)| !preference.contains(&key.as_str()))
        .map(|(_, original)| *original)
        .collect();

    let splice_at = known.iter().position(|(key, _)| *key == anchor);

    let known_names = known.iter().map(|(_, original)| *original);
    let ordered: Vec<&str> = match splice_at {
        Some(pos) => known_names
            .clone()
            .take(pos)
            .chain(others)
            .chain(known_names.skip(pos))
            .collect(),
        None => known_names.chain(others).collect(),
    };

    ordered.into_iter().map(str::to_string).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
