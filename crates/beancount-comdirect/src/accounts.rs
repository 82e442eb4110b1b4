//! Field layout of the account sections found in a comdirect export.

use std::fmt;
use std::str::FromStr;

pub const BOOKING_DATE: &str = "Buchungstag";
pub const BOOKING_TEXT: &str = "Buchungstext";
pub const AMOUNT: &str = "Umsatz in EUR";
pub const UNITS: &str = "Stück / Nom.";
pub const SECURITY_NAME: &str = "Bezeichnung";
pub const SECURITY_ID: &str = "WKN";
pub const CURRENCY: &str = "Währung";
pub const EXECUTION_PRICE: &str = "Ausführungskurs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccountKind {
    Checking,
    Savings,
    Credit,
    Brokerage,
}

#[derive(Debug, PartialEq, Eq)]
pub struct AccountSchema {
    pub kind: AccountKind,
    pub label: &'static str,
    /// Whether the preamble states a closing balance (`Neuer Kontostand`).
    pub has_balance: bool,
    /// Column names in file order. The trailing empty name stands for the
    /// delimiter every row ends with.
    pub fields: &'static [&'static str],
}

const CHECKING: AccountSchema = AccountSchema {
    kind: AccountKind::Checking,
    label: "Girokonto",
    has_balance: true,
    fields: &[
        BOOKING_DATE,
        "Wertstellung (Valuta)",
        "Vorgang",
        BOOKING_TEXT,
        AMOUNT,
        "",
    ],
};

const SAVINGS: AccountSchema = AccountSchema {
    kind: AccountKind::Savings,
    label: "Tagesgeld PLUS-Konto",
    has_balance: true,
    fields: &[
        BOOKING_DATE,
        "Wertstellung (Valuta)",
        "Vorgang",
        BOOKING_TEXT,
        AMOUNT,
        "",
    ],
};

const CREDIT: AccountSchema = AccountSchema {
    kind: AccountKind::Credit,
    label: "Visa-Karte (Kreditkarte)",
    has_balance: true,
    fields: &[
        BOOKING_DATE,
        "Umsatztag",
        "Vorgang",
        "Referenz",
        BOOKING_TEXT,
        AMOUNT,
        "",
    ],
};

const BROKERAGE: AccountSchema = AccountSchema {
    kind: AccountKind::Brokerage,
    label: "Depot",
    has_balance: false,
    fields: &[
        BOOKING_DATE,
        "Geschäftstag",
        UNITS,
        SECURITY_NAME,
        SECURITY_ID,
        CURRENCY,
        EXECUTION_PRICE,
        AMOUNT,
        "",
    ],
};

impl AccountKind {
    pub const ALL: [AccountKind; 4] = [
        AccountKind::Checking,
        AccountKind::Savings,
        AccountKind::Credit,
        AccountKind::Brokerage,
    ];

    pub fn schema(self) -> &'static AccountSchema {
        match self {
            AccountKind::Checking => &CHECKING,
            AccountKind::Savings => &SAVINGS,
            AccountKind::Credit => &CREDIT,
            AccountKind::Brokerage => &BROKERAGE,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
            AccountKind::Credit => "credit",
            AccountKind::Brokerage => "brokerage",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| format!("unknown account kind '{s}'"))
    }
}

impl AccountSchema {
    /// The column header line as it appears in the export.
    pub fn header_row(&self) -> String {
        self.fields
            .iter()
            .map(|field| {
                if field.is_empty() {
                    String::new()
                } else {
                    format!("\"{field}\"")
                }
            })
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| *field == name)
    }
}
