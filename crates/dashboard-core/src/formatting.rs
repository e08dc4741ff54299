/// Default currency symbol for amounts.
pub const DEFAULT_CURRENCY: &str = "₹";

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Group on the absolute value, re-attach the sign afterwards.
    let negative = value < 0.0;

    // std formatting rounds exact midpoints to even (2.5 -> "2").
    let digits = format!("{:.*}", decimals as usize, value.abs());
    let result = match digits.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", group_thousands(integer), fraction),
        None => group_thousands(&digits),
    };

    // "-0" is never printed.
    if negative && result.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format an amount as a whole-unit currency string: symbol, thousands
/// separators, no decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_currency_whole;
///
/// assert_eq!(format_currency_whole(1234.56, "₹"), "₹1,235");
/// assert_eq!(format_currency_whole(1234.5, "₹"), "₹1,234");
/// assert_eq!(format_currency_whole(0.0, "₹"), "₹0");
/// assert_eq!(format_currency_whole(-9500.0, "$"), "$-9,500");
/// ```
pub fn format_currency_whole(amount: f64, symbol: &str) -> String {
    format!("{}{}", symbol, format_number(amount, 0))
}

/// Compact axis label: `950`, `12.5k`, `3.2M`.
pub fn format_compact(amount: f64) -> String {
    let abs = amount.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", amount / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", amount / 1_000.0)
    } else {
        format!("{:.0}", amount)
    }
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
