//! Data Loader Module
//! Handles CSV / XLS / XLSX parsing into a de-duplicated `RawTable`.

use super::table::{Cell, RawTable};
use calamine::{open_workbook_from_rs, Data, Reader, Xls, Xlsx};
use polars::prelude::{Column, CsvReadOptions, DataType, PolarsResult, SerReader};
use std::fmt::Display;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Unsupported file format: {0}. Please upload CSV or Excel.")]
    UnsupportedFormat(String),
    #[error("Unable to read the uploaded file: {0}")]
    Parse(String),
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

impl LoaderError {
    /// Likely causes shown next to a parse diagnostic.
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            LoaderError::Parse(_) => &[
                "File is corrupted",
                "File is not a real Excel file",
                "CSV renamed as .xlsx",
                "Google Sheet exported incorrectly",
            ],
            _ => &[],
        }
    }
}

/// Tabular formats accepted for upload, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated text
    Csv,
    /// Legacy binary workbook
    Xls,
    /// Zipped XML workbook
    Xlsx,
}

impl FileFormat {
    pub const EXTENSIONS: [&'static str; 3] = ["csv", "xls", "xlsx"];

    /// Dispatch strictly on the file name suffix, ignoring case.
    pub fn from_file_name(file_name: &str) -> Result<Self, LoaderError> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else if lower.ends_with(".xls") {
            Ok(FileFormat::Xls)
        } else if lower.ends_with(".xlsx") {
            Ok(FileFormat::Xlsx)
        } else {
            Err(LoaderError::UnsupportedFormat(file_name.to_string()))
        }
    }
}

/// Turns uploaded bytes into a cleaned `RawTable`.
pub struct DataLoader;

impl DataLoader {
    /// Parse `bytes` according to the extension of `file_name`, drop exact
    /// duplicate rows and trim header whitespace.
    pub fn load(file_name: &str, bytes: &[u8]) -> Result<RawTable, LoaderError> {
        let format = FileFormat::from_file_name(file_name)?;
        tracing::info!(file = file_name, ?format, size = bytes.len(), "Loading upload");

        let table = match format {
            FileFormat::Csv => Self::parse_csv(bytes),
            FileFormat::Xls => Self::parse_workbook::<Xls<Cursor<Vec<u8>>>>(bytes),
            FileFormat::Xlsx => Self::parse_workbook::<Xlsx<Cursor<Vec<u8>>>>(bytes),
        }
        .inspect_err(|e| tracing::warn!(file = file_name, "Parse failed: {}", e))?;

        let parsed_rows = table.row_count();
        let table = table.drop_duplicates().trim_column_names();
        tracing::info!(
            file = file_name,
            rows = table.row_count(),
            duplicates = parsed_rows - table.row_count(),
            columns = table.column_count(),
            "Upload loaded"
        );
        Ok(table)
    }

    /// Read a file from disk and load it under its own name.
    pub fn load_path(path: &Path) -> Result<RawTable, LoaderError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        // Reject unknown extensions before touching the disk.
        FileFormat::from_file_name(&file_name)?;
        let bytes = std::fs::read(path)?;
        Self::load(&file_name, &bytes)
    }

    fn parse_csv(bytes: &[u8]) -> Result<RawTable, LoaderError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(RawTable::default());
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()
            .map_err(parse_error)?;

        // polars de-duplicates and fills in header names; keep the file's own.
        let columns = match Self::csv_header(bytes)? {
            header if header.len() == df.width() => header,
            _ => df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let mut column_cells = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            column_cells.push(Self::column_to_cells(column).map_err(parse_error)?);
        }

        let rows = (0..df.height())
            .map(|i| column_cells.iter().map(|cells| cells[i].clone()).collect())
            .collect();

        Ok(RawTable::new(columns, rows))
    }

    /// First CSV record as written, blank names become `Unnamed: i`.
    fn csv_header(bytes: &[u8]) -> Result<Vec<String>, LoaderError> {
        let header = CsvReadOptions::default()
            .with_has_header(false)
            .with_n_rows(Some(1))
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()
            .map_err(parse_error)?;

        let mut names = Vec::with_capacity(header.width());
        for (idx, column) in header.get_columns().iter().enumerate() {
            let name = column
                .str()
                .map_err(parse_error)?
                .get(0)
                .filter(|name| !name.is_empty())
                .map_or_else(|| format!("Unnamed: {}", idx), str::to_string);
            names.push(name);
        }
        Ok(names)
    }

    /// Numeric columns become `Number`, everything else is read as text.
    fn column_to_cells(column: &Column) -> PolarsResult<Vec<Cell>> {
        if column.dtype().is_primitive_numeric() {
            let values = column.cast(&DataType::Float64)?;
            Ok(values
                .f64()?
                .into_iter()
                .map(|v| v.map_or(Cell::Missing, Cell::Number))
                .collect())
        } else {
            let values = column.cast(&DataType::String)?;
            Ok(values
                .str()?
                .into_iter()
                .map(|v| v.map_or(Cell::Missing, Cell::text))
                .collect())
        }
    }

    /// Read the first worksheet; its first row is the header.
    fn parse_workbook<R>(bytes: &[u8]) -> Result<RawTable, LoaderError>
    where
        R: Reader<Cursor<Vec<u8>>>,
        R::Error: Display,
    {
        let mut workbook: R =
            open_workbook_from_rs(Cursor::new(bytes.to_vec())).map_err(parse_error)?;

        let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
            return Ok(RawTable::default());
        };
        let range = workbook.worksheet_range(&sheet_name).map_err(parse_error)?;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(RawTable::default());
        };

        let columns = header
            .iter()
            .enumerate()
            .map(|(idx, cell)| match cell {
                Data::Empty => format!("Unnamed: {}", idx),
                other => Self::data_to_cell(other).to_string(),
            })
            .collect();
        let data = rows
            .map(|row| row.iter().map(Self::data_to_cell).collect())
            .collect();

        Ok(RawTable::new(columns, data))
    }

    fn data_to_cell(data: &Data) -> Cell {
        match data {
            Data::Empty => Cell::Missing,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(true) => Cell::text("True"),
            Data::Bool(false) => Cell::text("False"),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

fn parse_error(e: impl Display) -> LoaderError {
    LoaderError::Parse(e.to_string())
}
