//! Data module - file loading, raw tables and text cleaning

mod loader;
mod processor;
mod table;

pub use loader::{DataLoader, FileFormat, LoaderError};
pub use processor::{title_case, DataProcessor, NormalizeOptions, NormalizedValue};
pub use table::{Cell, ColumnNotFoundError, RawTable};
