//! Raw Table Module
//! In-memory tabular data as loaded from an uploaded file.

use rand::seq::index;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Selected column is absent from the loaded table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Column not found: {0}")]
pub struct ColumnNotFoundError(pub String);

/// A single untyped cell value.
#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Render a number the way a spreadsheet user expects to read it.
    ///
    /// Integral values print without a fractional part; everything else
    /// uses the shortest float rendering.
    pub fn format_number(value: f64) -> String {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            format!("{}", value)
        }
    }
}

// Numbers compare by bit pattern so whole-row equality is total.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::Number(a), Cell::Number(b)) => a.to_bits() == b.to_bits(),
            (Cell::Missing, Cell::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Text(s) => s.hash(state),
            Cell::Number(n) => n.to_bits().hash(state),
            Cell::Missing => {}
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => f.write_str(&Self::format_number(*n)),
            Cell::Missing => Ok(()),
        }
    }
}

/// Ordered rows under a header of column names.
///
/// Column names are not required to be unique; lookups by name resolve
/// to the first matching column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Build a table, padding short rows with `Missing` and cutting long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Missing);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of `name`, or the error every pipeline stage reports for it.
    pub fn require_column(&self, name: &str) -> Result<usize, ColumnNotFoundError> {
        self.column_index(name)
            .ok_or_else(|| ColumnNotFoundError(name.to_string()))
    }

    /// Iterate the cells of one column.
    pub fn column_cells(&self, idx: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Remove rows equal to an earlier row, keeping first occurrences in order.
    pub fn drop_duplicates(self) -> Self {
        let mut seen: HashSet<Vec<Cell>> = HashSet::with_capacity(self.rows.len());
        let rows = self
            .rows
            .into_iter()
            .filter(|row| seen.insert(row.clone()))
            .collect();
        Self {
            columns: self.columns,
            rows,
        }
    }

    pub fn trim_column_names(self) -> Self {
        Self {
            columns: self
                .columns
                .into_iter()
                .map(|c| c.trim().to_string())
                .collect(),
            rows: self.rows,
        }
    }

    /// Return a copy of the table with column `idx` replaced by `cells`.
    pub fn with_column(&self, idx: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), self.rows.len());
        let rows = self
            .rows
            .iter()
            .zip(cells)
            .map(|(row, cell)| {
                let mut row = row.clone();
                row[idx] = cell;
                row
            })
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Uniform random sample of at most `limit` rows, original order kept.
    pub fn sample<R: Rng + ?Sized>(&self, limit: usize, rng: &mut R) -> Self {
        let amount = limit.min(self.rows.len());
        let mut picked = index::sample(rng, self.rows.len(), amount).into_vec();
        picked.sort_unstable();
        Self {
            columns: self.columns.clone(),
            rows: picked.into_iter().map(|i| self.rows[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table(rows: &[(&str, f64)]) -> RawTable {
        RawTable::new(
            vec![" Name ".into(), "Score".into()],
            rows.iter()
                .map(|(n, s)| vec![Cell::text(*n), Cell::Number(*s)])
                .collect(),
        )
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(Cell::format_number(3.0), "3");
        assert_eq!(Cell::format_number(-12.0), "-12");
        assert_eq!(Cell::format_number(1.5), "1.5");
        assert_eq!(Cell::format_number(f64::NAN), "NaN");
        assert_eq!(Cell::Missing.to_string(), "");
    }

    #[test]
    fn test_nan_cells_are_equal() {
        assert_eq!(Cell::Number(f64::NAN), Cell::Number(f64::NAN));
        assert_ne!(Cell::Number(1.0), Cell::text("1"));
        assert_ne!(Cell::Missing, Cell::text(""));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let t = RawTable::new(
            vec!["a".into(), "b".into()],
            vec![vec![Cell::text("x")], vec![Cell::text("y"), Cell::Number(1.0), Cell::Missing]],
        );
        assert_eq!(t.rows()[0], vec![Cell::text("x"), Cell::Missing]);
        assert_eq!(t.rows()[1].len(), 2);
    }

    #[test]
    fn test_drop_duplicates_keeps_first_occurrence() {
        let t = table(&[("a", 1.0), ("b", 2.0), ("a", 1.0), ("a", 2.0), ("b", 2.0)]).drop_duplicates();
        let names: Vec<String> = t.column_cells(0).map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn test_trim_column_names_keeps_duplicates() {
        let t = RawTable::new(vec![" id".into(), "id ".into()], vec![]).trim_column_names();
        assert_eq!(t.columns(), &["id".to_string(), "id".to_string()]);
        assert_eq!(t.column_index("id"), Some(0));
    }

    #[test]
    fn test_require_column_reports_name() {
        let t = table(&[]);
        assert_eq!(
            t.require_column("Missing"),
            Err(ColumnNotFoundError("Missing".into()))
        );
    }

    #[test]
    fn test_with_column_leaves_original_untouched() {
        let t = table(&[("a", 1.0), ("b", 2.0)]);
        let updated = t.with_column(0, vec![Cell::text("A"), Cell::text("B")]);
        assert_eq!(t.rows()[0][0], Cell::text("a"));
        assert_eq!(updated.rows()[0][0], Cell::text("A"));
        assert_eq!(updated.rows()[1][1], Cell::Number(2.0));
    }

    #[test]
    fn test_sample_is_bounded_and_ordered() {
        let rows: Vec<(String, f64)> = (0..50).map(|i| (format!("r{}", i), i as f64)).collect();
        let refs: Vec<(&str, f64)> = rows.iter().map(|(n, s)| (n.as_str(), *s)).collect();
        let t = table(&refs);
        let mut rng = StdRng::seed_from_u64(7);

        let sample = t.sample(10, &mut rng);
        assert_eq!(sample.row_count(), 10);
        let scores: Vec<f64> = sample
            .column_cells(1)
            .map(|c| match c {
                Cell::Number(n) => *n,
                _ => panic!("expected number"),
            })
            .collect();
        assert!(scores.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(t.sample(500, &mut rng).row_count(), 50);
    }
}
