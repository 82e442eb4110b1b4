//! Building ledger transactions from decoded rows.

use chrono::NaiveDate;

use crate::Decimal;
use crate::accounts::{
    AMOUNT, AccountKind, BOOKING_TEXT, CURRENCY, EXECUTION_PRICE, SECURITY_ID, SECURITY_NAME,
    UNITS,
};
use crate::balance;
use crate::entry::{Amount, Cost, Meta, Posting, Transaction};
use crate::error::{FormatError, Result};
use crate::narration::Narration;
use crate::number::parse_amount;
use crate::row::RawRow;

/// Counter account of security purchases and sales, to be completed by hand.
pub const CASH_PLACEHOLDER: &str = "Assets:TODO:Cash";
/// Fees are not part of the export, the posting is left without amount.
pub const FEE_PLACEHOLDER: &str = "Expenses:TODO:Fees";

const FLAG: char = '*';

pub struct TransactionBuilder<'a> {
    pub kind: AccountKind,
    pub account: &'a str,
    pub filename: &'a str,
}

impl TransactionBuilder<'_> {
    pub fn build(&self, row: &RawRow<'_>, date: NaiveDate) -> Result<Transaction> {
        let meta = Meta {
            filename: self.filename.to_string(),
            lineno: row.line,
        };
        match self.kind {
            AccountKind::Checking | AccountKind::Savings | AccountKind::Credit => {
                self.cash(row, date, meta)
            }
            AccountKind::Brokerage => self.brokerage(row, date, meta),
        }
    }

    fn cash(&self, row: &RawRow<'_>, date: NaiveDate, meta: Meta) -> Result<Transaction> {
        let text = row.get(BOOKING_TEXT)?;
        let amount = decimal(row, AMOUNT)?;
        let narration = Narration::parse(text);

        Ok(Transaction {
            meta,
            date,
            flag: FLAG,
            payee: narration.counterparty().map(ToOwned::to_owned),
            narration: narration.text().unwrap_or(text).to_string(),
            postings: vec![
                Posting::new(self.account).with_amount(Amount::new(amount, balance::CURRENCY)),
            ],
        })
    }

    fn brokerage(&self, row: &RawRow<'_>, date: NaiveDate, meta: Meta) -> Result<Transaction> {
        let amount = decimal(row, AMOUNT)?;
        let units = decimal(row, UNITS)?;
        let price = decimal(row, EXECUTION_PRICE)?;
        let security = row.get(SECURITY_ID)?.trim();
        let currency = row.get(CURRENCY)?.trim();

        let cash = Posting::new(CASH_PLACEHOLDER).with_amount(Amount::new(-amount, balance::CURRENCY));
        let fee = Posting::new(FEE_PLACEHOLDER);
        let position = Posting::new(self.account)
            .with_amount(Amount::new(units, security))
            .with_cost(Cost {
                number: price,
                currency: currency.to_string(),
            });

        Ok(Transaction {
            meta,
            date,
            flag: FLAG,
            payee: None,
            narration: row.get(SECURITY_NAME)?.to_string(),
            postings: vec![cash, fee, position],
        })
    }
}

fn decimal(row: &RawRow<'_>, field: &'static str) -> Result<Decimal> {
    let value = row.get(field)?;
    parse_amount(value).ok_or_else(|| FormatError::InvalidAmount {
        line: row.line,
        value: value.to_string(),
    })
}
