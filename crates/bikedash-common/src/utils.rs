//! Shared formatting helpers for chart labels and reports.

use chrono::NaiveDate;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Formats a date for display.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a count with thousands separators, e.g. `3292679` -> `3,292,679`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Short month label for a 1-based month number; unknown numbers print as-is.
pub fn month_label(month: u8) -> String {
    usize::from(month)
        .checked_sub(1)
        .and_then(|idx| MONTH_ABBREVIATIONS.get(idx))
        .map_or_else(|| month.to_string(), |name| (*name).to_string())
}

/// Calendar year for a dataset year code.
pub fn year_label(code: u8, base_year: Option<i32>) -> String {
    base_year.map_or_else(
        || format!("Year {code}"),
        |base| (base + i32::from(code)).to_string(),
    )
}

/// Hour of day in 24-hour notation.
pub fn format_hour(hour: u8) -> String {
    format!("{hour:02}:00")
}
