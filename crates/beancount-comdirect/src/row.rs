use crate::accounts::AccountSchema;
use crate::error::{FormatError, Result};

/// One physical line of a section, split into its columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow<'s> {
    schema: &'s AccountSchema,
    values: Vec<String>,
    /// 1-based line number in the file.
    pub line: usize,
}

impl<'s> RawRow<'s> {
    pub fn decode(text: &str, line: usize, schema: &'s AccountSchema) -> Result<RawRow<'s>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let values = match reader.records().next() {
            Some(record) => record
                .map_err(|e| FormatError::MalformedRow {
                    line,
                    message: e.to_string(),
                })?
                .iter()
                .map(ToOwned::to_owned)
                .collect(),
            None => Vec::new(),
        };

        Ok(RawRow {
            schema,
            values,
            line,
        })
    }

    /// Blank lines and bare separators between sections.
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|value| value.trim().is_empty())
    }

    /// The booking date column, which also carries the sentinel markers.
    pub fn date_column(&self) -> &str {
        self.values.first().map(String::as_str).unwrap_or_default()
    }

    pub fn column(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Ensure the row has exactly one value per schema field.
    pub fn check_width(&self) -> Result<()> {
        if self.values.len() != self.schema.fields.len() {
            return Err(FormatError::ColumnCount {
                line: self.line,
                expected: self.schema.fields.len(),
                found: self.values.len(),
            });
        }
        Ok(())
    }

    pub fn get(&self, name: &'static str) -> Result<&str> {
        self.schema
            .column(name)
            .and_then(|index| self.column(index))
            .ok_or(FormatError::MissingColumn {
                line: self.line,
                name,
            })
    }
}
