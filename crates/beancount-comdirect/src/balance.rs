//! Turning the balances stated in the export into balance assertions.
//!
//! The export states two kinds of balances:
//! - the closing balance (`Neuer Kontostand`) in the preamble, valid at the end of the
//!   statement period, asserted on the day after the newest transaction,
//! - opening balances (`Alter Kontostand`) as rows between the transactions, valid before
//!   the transactions listed above them, asserted on the date of the row above.
//!
//! Rows run newest to oldest, so the "row above" is the oldest transaction seen so far.
//! Neither kind is essential for the import, so malformed values are skipped with a warning.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;

use crate::entry::{Amount, Balance, Meta};
use crate::number::parse_amount;
use crate::row::RawRow;

pub const OPENING_BALANCE: &str = "Alter Kontostand";
pub const CURRENCY: &str = "EUR";

static BALANCE_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?[0-9.]+(?:,[0-9]+)?)\s*(?:EUR)?$").expect("valid regex"));

pub struct BalanceTracker<'a> {
    account: &'a str,
    filename: &'a str,
    closing_balance: Option<String>,
    last_date: Option<NaiveDate>,
}

impl<'a> BalanceTracker<'a> {
    pub fn new(account: &'a str, filename: &'a str, closing_balance: Option<String>) -> Self {
        BalanceTracker {
            account,
            filename,
            closing_balance,
            last_date: None,
        }
    }

    /// Record an ordinary transaction row.
    ///
    /// Returns the closing balance assertion for the first transaction of the section,
    /// which must be emitted before the transaction itself.
    pub fn transaction(&mut self, date: NaiveDate, lineno: usize) -> Option<Balance> {
        self.last_date = Some(date);

        let raw = self.closing_balance.take()?;
        let Some(number) = parse_amount(&raw) else {
            tracing::warn!(line = lineno, value = %raw, "skipping unparsable closing balance");
            return None;
        };
        let Some(date) = date.checked_add_days(Days::new(1)) else {
            tracing::warn!(line = lineno, %date, "skipping closing balance after last date");
            return None;
        };

        Some(self.balance(date, number, lineno))
    }

    /// Handle an `Alter Kontostand` row.
    pub fn opening_balance(&self, row: &RawRow<'_>) -> Option<Balance> {
        let value = row.column(1).unwrap_or_default().trim();
        let Some(number) = BALANCE_AMOUNT
            .captures(value)
            .and_then(|captures| parse_amount(&captures[1]))
        else {
            tracing::warn!(line = row.line, value, "skipping unparsable opening balance");
            return None;
        };
        let Some(date) = self.last_date else {
            tracing::warn!(
                line = row.line,
                "skipping opening balance without preceding transaction"
            );
            return None;
        };

        Some(self.balance(date, number, row.line))
    }

    fn balance(&self, date: NaiveDate, number: crate::Decimal, lineno: usize) -> Balance {
        Balance {
            meta: Meta {
                filename: self.filename.to_string(),
                lineno,
            },
            date,
            account: self.account.to_string(),
            amount: Amount::new(number, CURRENCY),
        }
    }
}
