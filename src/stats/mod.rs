//! Stats module - cross tabulation and ranking

mod crosstab;

pub use crosstab::{CrossTabCalculator, FrequencyTable, RankedRow, RankedTopN, TopN};
