//! Money conversion between stored cents and display values.
//!
//! Amounts are stored as integer minor units. Display strings are rendered
//! in en-US dollars (`$1,234.56`) independent of the host locale.

use rust_decimal::Decimal;

/// Render integer cents as a dollar string, e.g. `15795` -> `"$157.95"`.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = group_thousands(abs / 100);
    format!("{sign}${dollars}.{:02}", abs % 100)
}

/// Convert integer cents to an exact major-unit decimal.
pub fn cents_to_major(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
