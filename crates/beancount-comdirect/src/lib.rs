//! Importer for comdirect account statement exports (`umsaetze_*.csv`).
//!
//! One export contains a section per account: checking (`Girokonto`), savings
//! (`Tagesgeld PLUS-Konto`), credit card (`Visa-Karte (Kreditkarte)`) and brokerage
//! (`Depot`). Each [`Importer`] handles one of these sections and books it to one ledger
//! account. Input is expected as decoded text lines; exports are ISO-8859-1.

pub mod accounts;
mod balance;
mod builder;
pub mod entry;
mod error;
mod extract;
mod narration;
mod number;
mod preamble;
mod row;
mod sorting;

pub type Decimal = rust_decimal::Decimal;

pub use accounts::{AccountKind, AccountSchema};
pub use builder::{CASH_PLACEHOLDER, FEE_PLACEHOLDER};
pub use entry::{Amount, Balance, Cost, Entry, Meta, Posting, Transaction, render};
pub use error::{FormatError, Result};
pub use extract::{extract, identify};
pub use narration::Narration;
pub use number::{parse_amount, parse_date};
pub use sorting::sort_entries;

/// Imports one section of an export into one ledger account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Importer {
    kind: AccountKind,
    account: String,
}

impl Importer {
    pub fn new(kind: AccountKind, account: impl Into<String>) -> Self {
        Importer {
            kind,
            account: account.into(),
        }
    }

    pub fn name(&self) -> String {
        format!("comdirect.{}", self.kind)
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// The account statements of this section belong to.
    pub fn file_account(&self) -> &str {
        &self.account
    }

    pub fn identify<I>(&self, lines: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        identify(lines, self.kind.schema())
    }

    pub fn extract<I>(&self, lines: I, filename: &str) -> Result<Vec<Entry>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        extract(lines, filename, self.kind.schema(), &self.account)
    }
}
