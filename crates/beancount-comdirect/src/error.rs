use thiserror::Error;

/// The export does not have the shape expected for the requested section.
///
/// Any of these aborts the current import attempt: a file that deviates from its schema must
/// not produce partial entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("line {line}: expected section separator ';', found {found:?}")]
    MissingSeparator { line: usize, found: String },

    #[error("no \"Umsätze {label}\" section found")]
    SectionNotFound { label: &'static str },

    #[error("line {line}: expected \"Neuer Kontostand\", found {found:?}")]
    MissingClosingBalance { line: usize, found: String },

    #[error("line {line}: expected blank line, found {found:?}")]
    ExpectedBlankLine { line: usize, found: String },

    #[error("line {line}: header row does not match, expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("unexpected end of input after line {line}")]
    UnexpectedEof { line: usize },

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: missing column {name:?}")]
    MissingColumn { line: usize, name: &'static str },

    #[error("line {line}: invalid date {value:?}")]
    InvalidDate { line: usize, value: String },

    #[error("line {line}: invalid amount {value:?}")]
    InvalidAmount { line: usize, value: String },

    #[error("line {line}: {message}")]
    MalformedRow { line: usize, message: String },
}

pub type Result<T, E = FormatError> = std::result::Result<T, E>;
