//! Invoice search terms and pagination arithmetic.

use chrono::{DateTime, NaiveDate};

/// Rows per page of the invoice table.
pub const ITEMS_PER_PAGE: i64 = 6;

/// Filter terms derived from a free-text invoice query.
///
/// The text always matches customer name, customer email and status as a
/// case-insensitive substring. When the text is also an integer it matches
/// the amount in cents exactly, and when it is a calendar date it matches the
/// invoice date exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSearch {
    pub pattern: String,
    pub amount: Option<i32>,
    pub date: Option<NaiveDate>,
}

impl InvoiceSearch {
    pub fn new(query: &str) -> Self {
        let trimmed = query.trim();
        Self {
            pattern: contains_pattern(query),
            amount: trimmed.parse().ok(),
            date: parse_date(trimmed),
        }
    }
}

/// `ILIKE` pattern matching `query` anywhere, with wildcards taken literally.
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y/%m/%d"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Row offset of a 1-based page. Pages below 1 are treated as page 1.
pub fn page_offset(page: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(ITEMS_PER_PAGE)
}

/// Number of pages needed for `total` rows.
pub fn page_count(total: i64) -> i64 {
    let total = total.max(0);
    (total + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE
}
