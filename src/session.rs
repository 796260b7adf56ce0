//! Session State Module
//! One uploaded table plus the render pass that turns a selection into results.

use crate::data::{ColumnNotFoundError, DataLoader, DataProcessor, LoaderError, NormalizeOptions, RawTable};
use crate::stats::{CrossTabCalculator, RankedTopN, TopN};
use rand::Rng;
use std::path::Path;
use std::sync::Arc;

/// User choices that drive a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub source_column: String,
    pub confirm_column: String,
    pub top_n: TopN,
}

impl Selection {
    /// First column as source, second (or first again) as confirmation.
    pub fn default_for(table: &RawTable, top_n: TopN) -> Option<Self> {
        let columns = table.columns();
        let source = columns.first()?;
        let confirm = columns.get(1).unwrap_or(source);
        Some(Self {
            source_column: source.clone(),
            confirm_column: confirm.clone(),
            top_n,
        })
    }
}

/// An uploaded file. Never mutated; a new upload replaces the whole value.
#[derive(Debug, Clone)]
pub struct Session {
    file_name: String,
    table: Arc<RawTable>,
}

impl Session {
    pub fn new(file_name: impl Into<String>, table: RawTable) -> Self {
        Self {
            file_name: file_name.into(),
            table: Arc::new(table),
        }
    }

    pub fn open(file_name: &str, bytes: &[u8]) -> Result<Self, LoaderError> {
        let table = DataLoader::load(file_name, bytes)?;
        Ok(Self::new(file_name, table))
    }

    pub fn open_path(path: &Path) -> Result<Self, LoaderError> {
        let table = DataLoader::load_path(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(file_name, table))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn table(&self) -> &RawTable {
        &self.table
    }

    /// Normalize both selected columns and rank the cross tabulation.
    pub fn analyze(
        &self,
        selection: &Selection,
        options: &NormalizeOptions,
    ) -> Result<Analysis, ColumnNotFoundError> {
        let cleaned = DataProcessor::normalize_column(&self.table, &selection.source_column, options)?;
        let cleaned = DataProcessor::normalize_column(&cleaned, &selection.confirm_column, options)?;
        let ranked = CrossTabCalculator::aggregate(
            &cleaned,
            &selection.source_column,
            &selection.confirm_column,
            selection.top_n,
        )?;

        tracing::info!(
            file = %self.file_name,
            source = %selection.source_column,
            confirm = %selection.confirm_column,
            top_n = %selection.top_n,
            shown = ranked.rows.len(),
            "Analysis complete"
        );

        Ok(Analysis { cleaned, ranked })
    }
}

/// Output of one render pass.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Loaded table with the two selected columns normalized
    pub cleaned: RawTable,
    pub ranked: RankedTopN,
}

impl Analysis {
    /// Random preview rows from the cleaned table.
    pub fn sample<R: Rng + ?Sized>(&self, limit: usize, rng: &mut R) -> RawTable {
        self.cleaned.sample(limit, rng)
    }
}
