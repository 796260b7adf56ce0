//! Cross-Tabulation Module
//! Counts (source, confirmation) pairs and ranks sources by total frequency.

use crate::data::{ColumnNotFoundError, RawTable};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Number of ranked sources to keep, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TopN(usize);

impl TopN {
    pub const MIN: usize = 5;
    pub const MAX: usize = 30;
    pub const DEFAULT: usize = 15;

    /// `None` when `n` lies outside the accepted range.
    pub fn new(n: usize) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&n).then_some(Self(n))
    }

    pub fn clamped(n: usize) -> Self {
        Self(n.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for TopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full frequency table: one row per distinct source value, one column per
/// distinct confirmation value. Both axes are in lexical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    pub source_values: Vec<String>,
    pub confirm_values: Vec<String>,
    /// `counts[row][col]`
    pub counts: Vec<Vec<u64>>,
}

impl FrequencyTable {
    pub fn is_empty(&self) -> bool {
        self.source_values.is_empty()
    }

    pub fn count(&self, source: &str, confirm: &str) -> u64 {
        let row = self.source_values.iter().position(|s| s == source);
        let col = self.confirm_values.iter().position(|c| c == confirm);
        match (row, col) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    pub fn row_total(&self, row: usize) -> u64 {
        self.counts[row].iter().sum()
    }

    pub fn grand_total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

/// One displayed source row; counts align with `RankedTopN::confirm_values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRow {
    pub source: String,
    pub counts: Vec<u64>,
}

impl RankedRow {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Top sources ordered by total count, highest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedTopN {
    pub source_column: String,
    pub confirm_column: String,
    pub confirm_values: Vec<String>,
    pub rows: Vec<RankedRow>,
}

impl RankedTopN {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest single cell, used to scale chart axes.
    pub fn max_count(&self) -> u64 {
        self.rows
            .iter()
            .flat_map(|r| r.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Builds cross tabulations from a normalized table.
pub struct CrossTabCalculator;

impl CrossTabCalculator {
    /// Count rows per (source, confirm) pair over the whole table.
    ///
    /// Both columns are read as displayed text; callers normalize first.
    pub fn frequency_table(
        table: &RawTable,
        source_col: &str,
        confirm_col: &str,
    ) -> Result<FrequencyTable, ColumnNotFoundError> {
        let source_idx = table.require_column(source_col)?;
        let confirm_idx = table.require_column(confirm_col)?;

        let mut pairs: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
        let mut confirm_set: BTreeSet<String> = BTreeSet::new();

        for row in table.rows() {
            let source = row[source_idx].to_string();
            let confirm = row[confirm_idx].to_string();
            *pairs
                .entry(source)
                .or_default()
                .entry(confirm.clone())
                .or_insert(0) += 1;
            confirm_set.insert(confirm);
        }

        let confirm_values: Vec<String> = confirm_set.into_iter().collect();
        let mut source_values = Vec::with_capacity(pairs.len());
        let mut counts = Vec::with_capacity(pairs.len());
        for (source, by_confirm) in pairs {
            counts.push(
                confirm_values
                    .iter()
                    .map(|c| by_confirm.get(c).copied().unwrap_or(0))
                    .collect(),
            );
            source_values.push(source);
        }

        tracing::debug!(
            sources = source_values.len(),
            confirm_values = confirm_values.len(),
            rows = table.row_count(),
            "Built frequency table"
        );

        Ok(FrequencyTable {
            source_values,
            confirm_values,
            counts,
        })
    }

    /// Sort rows by total descending and keep the first `top_n`.
    ///
    /// The sort is stable, so equal totals keep the lexical source order.
    pub fn rank(freq: &FrequencyTable, top_n: TopN) -> Vec<RankedRow> {
        let mut rows: Vec<(u64, RankedRow)> = freq
            .source_values
            .iter()
            .zip(&freq.counts)
            .enumerate()
            .map(|(i, (source, counts))| {
                (
                    freq.row_total(i),
                    RankedRow {
                        source: source.clone(),
                        counts: counts.clone(),
                    },
                )
            })
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        rows.truncate(top_n.get());
        rows.into_iter().map(|(_, row)| row).collect()
    }

    /// Frequency table, ranking and truncation in one call.
    pub fn aggregate(
        table: &RawTable,
        source_col: &str,
        confirm_col: &str,
        top_n: TopN,
    ) -> Result<RankedTopN, ColumnNotFoundError> {
        let freq = Self::frequency_table(table, source_col, confirm_col)?;
        let rows = Self::rank(&freq, top_n);
        Ok(RankedTopN {
            source_column: source_col.to_string(),
            confirm_column: confirm_col.to_string(),
            confirm_values: freq.confirm_values,
            rows,
        })
    }
}
