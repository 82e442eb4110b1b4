use crate::accounts::AccountSchema;
use crate::balance::{BalanceTracker, OPENING_BALANCE};
use crate::builder::TransactionBuilder;
use crate::entry::Entry;
use crate::error::{FormatError, Result};
use crate::number::parse_date;
use crate::preamble::{self, SECTION_MARKER};
use crate::row::RawRow;

const NO_TRANSACTIONS: &str = "Keine Umsätze vorhanden.";
const PENDING: &str = "offen";

enum RowKind {
    Blank,
    NextSection,
    NoTransactions,
    Pending,
    OpeningBalance,
    Transaction,
}

fn classify(row: &RawRow<'_>) -> RowKind {
    let date = row.date_column().trim();
    if row.is_blank() {
        RowKind::Blank
    } else if date.starts_with(SECTION_MARKER) {
        RowKind::NextSection
    } else if date == NO_TRANSACTIONS {
        RowKind::NoTransactions
    } else if date == PENDING {
        RowKind::Pending
    } else if date == OPENING_BALANCE {
        RowKind::OpeningBalance
    } else {
        RowKind::Transaction
    }
}

/// Whether `lines` contain a well-formed section for `schema`.
pub fn identify<I>(lines: I, schema: &AccountSchema) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    match preamble::locate(&mut lines.into_iter(), schema) {
        Ok(_) => true,
        Err(error) => {
            tracing::trace!(section = schema.label, %error, "not identified");
            false
        }
    }
}

/// Extract all entries of `schema`'s section, in file order.
///
/// `filename` is recorded in the entries' metadata, `account` is the ledger account the
/// section's postings and balances are booked to.
pub fn extract<I>(
    lines: I,
    filename: &str,
    schema: &AccountSchema,
    account: &str,
) -> Result<Vec<Entry>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut lines = lines.into_iter();
    let preamble = preamble::locate(&mut lines, schema)?;

    let mut balances = BalanceTracker::new(account, filename, preamble.closing_balance);
    let builder = TransactionBuilder {
        kind: schema.kind,
        account,
        filename,
    };
    let mut entries = Vec::new();

    for (line, text) in (preamble.consumed + 1..).zip(lines) {
        let row = RawRow::decode(text.as_ref(), line, schema)?;
        match classify(&row) {
            RowKind::Blank => continue,
            RowKind::NextSection => {
                tracing::debug!(line, "section ends");
                break;
            }
            RowKind::NoTransactions | RowKind::Pending => {
                tracing::debug!(line, value = row.date_column(), "skipping row");
                continue;
            }
            RowKind::OpeningBalance => {
                entries.extend(balances.opening_balance(&row).map(Entry::Balance));
            }
            RowKind::Transaction => {
                row.check_width()?;
                let raw_date = row.date_column();
                let date = parse_date(raw_date).ok_or_else(|| FormatError::InvalidDate {
                    line,
                    value: raw_date.to_string(),
                })?;

                entries.extend(balances.transaction(date, line).map(Entry::Balance));
                entries.push(Entry::Transaction(builder.build(&row, date)?));
            }
        }
    }

    tracing::debug!(
        section = schema.label,
        entries = entries.len(),
        "extracted section"
    );

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountKind;
    use crate::entry::render;

    const CHECKING: &str = r#";
"Umsätze Girokonto";"Zeitraum: 01.10.2010 - 16.01.2021";
"Neuer Kontostand";"1.134,11 EUR";

"Buchungstag";"Wertstellung (Valuta)";"Vorgang";"Buchungstext";"Umsatz in EUR";
"offen";"--";"Lastschrift / Belastung";"Auftraggeber: Stadtwerke Buchungstext: Abschlag";"-50,00";
"06.01.2021";"06.01.2021";"Lastschrift / Belastung";"Auftraggeber: PayPal (Europe) S.a.r.l. et Cie., S.C.A. Buchungstext: . FLIPDISH, Ihr Einkauf bei FLIPDIS H Ref. AA00000000000000/0000";"-9,00";
"04.01.2021";"04.01.2021";"Übertrag / Überweisung";"Empfänger: Max MusterKto/IBAN: DE00000000000000000000 BLZ/BIC: XXXXXXXXXXX Buchungstext: Miete Schlossallee 1 Ref. A000000000000000/0";"-12.001,02";
"Alter Kontostand";"13.144,13 EUR";

;
"Umsätze Visa-Karte (Kreditkarte)";"Zeitraum: 01.10.2010 - 16.01.2021";
"Neuer Kontostand";"0,00 EUR";

"Buchungstag";"Umsatztag";"Vorgang";"Referenz";"Buchungstext";"Umsatz in EUR";
"30.04.2020";"30.04.2020";"Visa-Kartenabrechnung";"000000000000801";" SUMME MONATSABRECHNUNG VISA ";"56,10";
"#;

    fn run(text: &str, kind: AccountKind) -> Result<Vec<Entry>> {
        extract(text.lines(), "umsaetze.csv", kind.schema(), "Assets:Comdirect")
    }

    #[test]
    fn checking_section_stops_at_next_section() {
        let entries = run(CHECKING, AccountKind::Checking).unwrap();
        insta::assert_snapshot!(render(&entries), @r#"
        2021-01-07 balance Assets:Comdirect 1134.11 EUR

        2021-01-06 * "PayPal (Europe) S.a.r.l. et Cie., S.C.A." ". FLIPDISH, Ihr Einkauf bei FLIPDIS H Ref. AA00000000000000/0000"
          Assets:Comdirect  -9.00 EUR

        2021-01-04 * "Max MusterKto/IBAN: DE00000000000000000000 BLZ/BIC: XXXXXXXXXXX" "Miete Schlossallee 1 Ref. A000000000000000/0"
          Assets:Comdirect  -12001.02 EUR

        2021-01-04 balance Assets:Comdirect 13144.13 EUR
        "#);
    }

    #[test]
    fn line_numbers() {
        let entries = run(CHECKING, AccountKind::Checking).unwrap();
        let lines: Vec<_> = entries.iter().map(|entry| entry.meta().lineno).collect();
        assert_eq!(lines, [7, 7, 8, 9]);
        assert!(entries.iter().all(|entry| entry.meta().filename == "umsaetze.csv"));
    }

    #[test]
    fn second_section() {
        let entries = run(CHECKING, AccountKind::Credit).unwrap();
        insta::assert_snapshot!(render(&entries), @r#"
        2020-05-01 balance Assets:Comdirect 0.00 EUR

        2020-04-30 * " SUMME MONATSABRECHNUNG VISA "
          Assets:Comdirect  56.10 EUR
        "#);
        assert_eq!(entries[1].meta().lineno, 16);
    }

    #[test]
    fn empty_section() {
        let text = r#";
"Umsätze Tagesgeld PLUS-Konto";"Zeitraum: 01.10.2010 - 16.01.2021";
"Neuer Kontostand";"2.000,00 EUR";

"Buchungstag";"Wertstellung (Valuta)";"Vorgang";"Buchungstext";"Umsatz in EUR";
"Keine Umsätze vorhanden.";
"Alter Kontostand";"2.000,00 EUR";
"#;
        assert_eq!(run(text, AccountKind::Savings), Ok(Vec::new()));
    }

    #[test]
    fn malformed_preamble_fails() {
        let text = CHECKING.replace("\"Neuer Kontostand\"", "\"Kontostand\"");
        assert!(matches!(
            run(&text, AccountKind::Checking),
            Err(FormatError::MissingClosingBalance { line: 3, .. })
        ));
        assert!(!identify(text.lines(), AccountKind::Checking.schema()));
    }

    #[test]
    fn short_row_fails() {
        let text = CHECKING.replace(r#""-9,00";"#, "");
        assert_eq!(
            run(&text, AccountKind::Checking),
            Err(FormatError::ColumnCount {
                line: 7,
                expected: 6,
                found: 5
            })
        );
    }

    #[test]
    fn invalid_date_fails() {
        let text = CHECKING.replace(r#""04.01.2021";"04.01.2021""#, r#""04.13.2021";"04.01.2021""#);
        assert_eq!(
            run(&text, AccountKind::Checking),
            Err(FormatError::InvalidDate {
                line: 8,
                value: "04.13.2021".to_string()
            })
        );
    }

    #[test]
    fn identify_sections() {
        assert!(identify(CHECKING.lines(), AccountKind::Checking.schema()));
        assert!(identify(CHECKING.lines(), AccountKind::Credit.schema()));
        assert!(!identify(CHECKING.lines(), AccountKind::Savings.schema()));
        assert!(!identify(CHECKING.lines(), AccountKind::Brokerage.schema()));
        assert!(!identify(["hello world"], AccountKind::Checking.schema()));
        assert!(!identify(Vec::<String>::new(), AccountKind::Checking.schema()));
    }

    #[test]
    fn idempotent() {
        let first = run(CHECKING, AccountKind::Checking).unwrap();
        let second = run(CHECKING, AccountKind::Checking).unwrap();
        assert_eq!(first, second);
    }
}
