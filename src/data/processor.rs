//! Data Processor Module
//! Handles text cleaning of the selected category columns (trim + title case).

use super::table::{Cell, ColumnNotFoundError, RawTable};
use std::fmt;

/// Policy for cells that carry no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Category assigned to missing cells
    pub missing_label: String,
    /// Treat whitespace-only text the same as a missing cell
    pub blank_as_missing: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            missing_label: "Unknown".to_string(),
            blank_as_missing: true,
        }
    }
}

/// A category value after string conversion, trimming and title casing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedValue(String);

impl NormalizedValue {
    pub fn from_cell(cell: &Cell, options: &NormalizeOptions) -> Self {
        let text = match cell {
            Cell::Missing => return Self::missing(options),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => Cell::format_number(*n),
        };
        if text.is_empty() && options.blank_as_missing {
            return Self::missing(options);
        }
        Self(title_case(&text))
    }

    fn missing(options: &NormalizeOptions) -> Self {
        // Title-cased so that normalizing the label again is a no-op.
        Self(title_case(options.missing_label.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NormalizedValue> for Cell {
    fn from(value: NormalizedValue) -> Self {
        Cell::Text(value.0)
    }
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A word starts at any letter that does not follow another letter, so
/// `"o'neil"` becomes `"O'Neil"` and `"walk-in"` becomes `"Walk-In"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                push_titlecase(&mut out, c);
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Title-case form of a word-initial letter.
///
/// Letters whose upper case spans several chars (`ß`, `ﬁ`) keep only the
/// first one upper-cased, so the result is stable under a second pass.
fn push_titlecase(out: &mut String, c: char) {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => out.push('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => out.push('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => out.push('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => out.push('ǲ'),
        _ => {
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            for rest in upper {
                out.extend(rest.to_lowercase());
            }
        }
    }
}

/// Handles data cleaning of the loaded table.
pub struct DataProcessor;

impl DataProcessor {
    /// Return a copy of `table` whose `column` holds normalized text.
    ///
    /// The input table is left untouched.
    pub fn normalize_column(
        table: &RawTable,
        column: &str,
        options: &NormalizeOptions,
    ) -> Result<RawTable, ColumnNotFoundError> {
        let idx = table.require_column(column)?;
        let cells = table
            .column_cells(idx)
            .map(|cell| NormalizedValue::from_cell(cell, options).into())
            .collect();
        Ok(table.with_column(idx, cells))
    }
}
