//! Ledger entries produced by the importer, rendered in beancount syntax.

use std::fmt;

use chrono::NaiveDate;

use crate::Decimal;

/// Where an entry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub filename: String,
    pub lineno: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    pub number: Decimal,
    pub currency: String,
}

/// Per-unit acquisition price of a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cost {
    pub number: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub account: String,
    /// `None` leaves the amount for the ledger to infer.
    pub amount: Option<Amount>,
    pub cost: Option<Cost>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub meta: Meta,
    pub date: NaiveDate,
    pub flag: char,
    pub payee: Option<String>,
    pub narration: String,
    pub postings: Vec<Posting>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub meta: Meta,
    pub date: NaiveDate,
    pub account: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Transaction(Transaction),
    Balance(Balance),
}

impl Amount {
    pub fn new(number: Decimal, currency: impl Into<String>) -> Self {
        Amount {
            number,
            currency: currency.into(),
        }
    }
}

impl Posting {
    pub fn new(account: impl Into<String>) -> Self {
        Posting {
            account: account.into(),
            amount: None,
            cost: None,
        }
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = Some(cost);
        self
    }
}

impl Entry {
    pub fn date(&self) -> NaiveDate {
        match self {
            Entry::Transaction(txn) => txn.date,
            Entry::Balance(balance) => balance.date,
        }
    }

    pub fn meta(&self) -> &Meta {
        match self {
            Entry::Transaction(txn) => &txn.meta,
            Entry::Balance(balance) => &balance.meta,
        }
    }

    pub fn as_transaction(&self) -> Option<&Transaction> {
        match self {
            Entry::Transaction(txn) => Some(txn),
            Entry::Balance(_) => None,
        }
    }

    pub fn as_balance(&self) -> Option<&Balance> {
        match self {
            Entry::Balance(balance) => Some(balance),
            Entry::Transaction(_) => None,
        }
    }
}

struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("\"")
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.currency)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {}}}", self.number, self.currency)
    }
}

impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}", self.account)?;
        if let Some(amount) = &self.amount {
            write!(f, "  {amount}")?;
        }
        if let Some(cost) = &self.cost {
            write!(f, " {cost}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.flag)?;
        if let Some(payee) = &self.payee {
            write!(f, " {}", Quoted(payee))?;
        }
        write!(f, " {}", Quoted(&self.narration))?;
        for posting in &self.postings {
            write!(f, "\n{posting}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} balance {} {}", self.date, self.account, self.amount)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Transaction(txn) => txn.fmt(f),
            Entry::Balance(balance) => balance.fmt(f),
        }
    }
}

/// Render entries as a beancount document, one blank line between entries.
pub fn render(entries: &[Entry]) -> String {
    let mut output = String::new();
    for entry in entries {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&entry.to_string());
        output.push('\n');
    }
    output
}
