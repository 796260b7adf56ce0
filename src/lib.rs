//! Admission Dashboard - cross tabulation of admission source against
//! confirmation status for uploaded CSV / Excel admission records.
//!
//! Pipeline: [`data::DataLoader`] → [`data::DataProcessor`] →
//! [`stats::CrossTabCalculator`], orchestrated per upload by
//! [`session::Session`]. The `gui` and `charts` modules only project the
//! ranked result.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod session;
pub mod stats;

pub use data::{Cell, ColumnNotFoundError, DataLoader, LoaderError, NormalizeOptions, RawTable};
pub use session::{Analysis, Selection, Session};
pub use stats::{CrossTabCalculator, FrequencyTable, RankedTopN, TopN};
