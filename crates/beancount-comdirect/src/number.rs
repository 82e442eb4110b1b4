//! German number and date notation.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::Decimal;

/// Parse `1.234,56` style amounts (`.` thousands, `,` decimal).
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// Parse `DD.MM.YYYY` dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d.%m.%Y").ok()
}
