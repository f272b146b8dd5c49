//! Data module - CSV loading and yearly aggregation

mod loader;
mod aggregator;

pub use loader::{discover_year_files, read_csv, unique_values, DataLoader, LoaderError};
pub use aggregator::{
    comparison_totals, AggregateError, Selection, YearlyTotal, ALL_CAUSES, ALL_REGIONS,
    CAUSE_COL, REGION_COL, TOTAL_COL,
};
