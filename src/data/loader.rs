//! CSV Data Loader Module
//! Handles CSV file loading with a per-path memoization cache, plus
//! year-file discovery for a data directory.

use polars::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("No obitos-<year>.csv files found in {0}")]
    NoYearFiles(PathBuf),
}

/// Parse a single CSV file using Polars.
pub fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
    if !path.is_file() {
        return Err(LoaderError::FileNotFound(path.to_path_buf()));
    }

    // Use lazy evaluation for memory efficiency, then collect
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    Ok(df)
}

/// Loads CSV files and keeps every parsed table in an in-memory cache
/// keyed by path. The cache is unbounded and lives for the process
/// lifetime; a path is parsed at most once.
pub struct DataLoader {
    cache: HashMap<PathBuf, DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Load a CSV file, returning the cached table on repeated calls
    /// with the same path.
    pub fn load_csv(&mut self, path: &Path) -> Result<&DataFrame, LoaderError> {
        match self.cache.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(read_csv(path)?)),
        }
    }

    /// Check whether a path has already been parsed.
    pub fn is_cached(&self, path: &Path) -> bool {
        self.cache.contains_key(path)
    }

    /// Store an externally parsed table (used for background loading).
    pub fn insert(&mut self, path: PathBuf, df: DataFrame) {
        self.cache.insert(path, df);
    }

    /// Get a cached table without touching the filesystem.
    pub fn get(&self, path: &Path) -> Option<&DataFrame> {
        self.cache.get(path)
    }
}

/// Scan a data directory for `obitos-<YYYY>.csv` files and return
/// (year, path) pairs sorted by year.
pub fn discover_year_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, LoaderError> {
    let mut files: Vec<(String, PathBuf)> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(year) = name
            .strip_prefix("obitos-")
            .and_then(|rest| rest.strip_suffix(".csv"))
        {
            if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
                files.push((year.to_string(), path.clone()));
            }
        }
    }

    if files.is_empty() {
        return Err(LoaderError::NoYearFiles(dir.to_path_buf()));
    }

    files.sort();
    Ok(files)
}

/// Get sorted unique non-null values from a column.
pub fn unique_values(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .ok()
        .and_then(|col| col.unique().ok())
        .map(|unique| {
            let series = unique.as_materialized_series();
            let mut values: Vec<String> = (0..series.len())
                .filter_map(|i| {
                    let val = series.get(i).ok()?;
                    if val.is_null() {
                        None
                    } else {
                        Some(val.to_string().trim_matches('"').to_string())
                    }
                })
                .collect();
            values.sort();
            values
        })
        .unwrap_or_default()
}
