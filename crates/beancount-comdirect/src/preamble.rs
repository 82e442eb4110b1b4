//! Locating a section and validating the lines before its first data row.
//!
//! ```text
//! ;
//! "Umsätze Girokonto";"Zeitraum: 01.10.2010 - 16.01.2021";
//! "Neuer Kontostand";"1.134,11 EUR";
//!
//! "Buchungstag";"Wertstellung (Valuta)";"Vorgang";"Buchungstext";"Umsatz in EUR";
//! ```
//!
//! Sections without a running balance (the depot) have no `Neuer Kontostand` line.

use std::sync::LazyLock;

use regex::Regex;

use crate::accounts::AccountSchema;
use crate::error::{FormatError, Result};

pub const SECTION_MARKER: &str = "Umsätze";
const SEPARATOR: &str = ";";

static CLOSING_BALANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"Neuer Kontostand";"(-?[0-9.,]+) EUR";$"#).expect("valid regex")
});

fn section_header(label: &str) -> Regex {
    let date = r"\d{2}\.\d{2}\.\d{4}";
    Regex::new(&format!(
        r#"^"{SECTION_MARKER} {}";"Zeitraum: {date} - {date}";$"#,
        regex::escape(label)
    ))
    .expect("valid regex")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    /// Number of lines read, including the header row.
    pub consumed: usize,
    /// The `Neuer Kontostand` amount, as written in the file.
    pub closing_balance: Option<String>,
}

struct Cursor<'i, I> {
    lines: &'i mut I,
    consumed: usize,
}

impl<I, S> Cursor<'_, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    fn next_line(&mut self) -> Result<String> {
        let line = self
            .lines
            .next()
            .ok_or(FormatError::UnexpectedEof {
                line: self.consumed,
            })?;
        self.consumed += 1;
        Ok(line.as_ref().trim().to_string())
    }
}

/// Advance `lines` past the preamble of `schema`'s section.
///
/// Other sections before the requested one are skipped.
pub fn locate<I, S>(lines: &mut I, schema: &AccountSchema) -> Result<Preamble>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let mut cursor = Cursor { lines, consumed: 0 };

    let first = cursor.next_line()?;
    // exports with the separator stripped start with an empty line instead
    if first != SEPARATOR && !first.is_empty() {
        return Err(FormatError::MissingSeparator {
            line: cursor.consumed,
            found: first,
        });
    }

    let header = section_header(schema.label);
    loop {
        match cursor.next_line() {
            Ok(line) if header.is_match(&line) => break,
            Ok(_) => continue,
            Err(FormatError::UnexpectedEof { .. }) => {
                return Err(FormatError::SectionNotFound {
                    label: schema.label,
                });
            }
            Err(e) => return Err(e),
        }
    }

    let closing_balance = if schema.has_balance {
        let line = cursor.next_line()?;
        let Some(captures) = CLOSING_BALANCE.captures(&line) else {
            return Err(FormatError::MissingClosingBalance {
                line: cursor.consumed,
                found: line,
            });
        };
        Some(captures[1].to_string())
    } else {
        None
    };

    let line = cursor.next_line()?;
    if !line.is_empty() {
        return Err(FormatError::ExpectedBlankLine {
            line: cursor.consumed,
            found: line,
        });
    }

    let line = cursor.next_line()?;
    let expected = schema.header_row();
    if line != expected {
        return Err(FormatError::HeaderMismatch {
            line: cursor.consumed,
            expected,
            found: line,
        });
    }

    tracing::debug!(
        section = schema.label,
        consumed = cursor.consumed,
        "located section"
    );

    Ok(Preamble {
        consumed: cursor.consumed,
        closing_balance,
    })
}
