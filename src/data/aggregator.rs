//! Comparison Aggregator Module
//! Reduces the yearly record tables to one total per year for the active
//! cause/region selection.

use polars::prelude::*;
use thiserror::Error;

/// Sentinel dropdown entries for the unfiltered cases.
pub const ALL_CAUSES: &str = "TODAS DOENÇAS";
pub const ALL_REGIONS: &str = "BRASIL";

/// Expected record-table columns.
pub const REGION_COL: &str = "uf";
pub const CAUSE_COL: &str = "tipo_doenca";
pub const TOTAL_COL: &str = "total";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No records for cause '{cause}', region '{region}' in year {year}")]
    MissingCategory {
        year: String,
        cause: String,
        region: String,
    },
}

/// A dropdown filter: either the sentinel "everything" entry or one
/// specific category value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Only(String),
}

impl Selection {
    /// Build a selection from a dropdown label, treating the sentinel
    /// (or an empty label before data is loaded) as unfiltered.
    pub fn from_label(label: &str, sentinel: &str) -> Self {
        if label.is_empty() || label == sentinel {
            Selection::All
        } else {
            Selection::Only(label.to_string())
        }
    }

    fn describe(&self, sentinel: &str) -> String {
        match self {
            Selection::All => sentinel.to_string(),
            Selection::Only(value) => value.clone(),
        }
    }
}

/// One row of the comparison result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyTotal {
    pub year: String,
    pub total: i64,
}

/// Reduce each year's table to a single total for the given cause and
/// region selections, preserving the input year order.
///
/// When at least one specific filter is active and a year has no
/// matching rows, the aggregation fails for that year rather than
/// reporting a fabricated zero.
pub fn comparison_totals(
    data: &[(String, DataFrame)],
    cause: &Selection,
    region: &Selection,
) -> Result<Vec<YearlyTotal>, AggregateError> {
    data.iter()
        .map(|(year, df)| {
            let total = filtered_sum(df, year, cause, region)?;
            Ok(YearlyTotal {
                year: year.clone(),
                total,
            })
        })
        .collect()
}

/// Sum the `total` column of one year's table under the active filters.
fn filtered_sum(
    df: &DataFrame,
    year: &str,
    cause: &Selection,
    region: &Selection,
) -> Result<i64, AggregateError> {
    let mut lazy = df.clone().lazy();
    let mut has_filter = false;

    if let Selection::Only(value) = cause {
        lazy = lazy.filter(col(CAUSE_COL).eq(lit(value.as_str())));
        has_filter = true;
    }
    if let Selection::Only(value) = region {
        lazy = lazy.filter(col(REGION_COL).eq(lit(value.as_str())));
        has_filter = true;
    }

    let filtered = lazy.select([col(TOTAL_COL)]).collect()?;

    if has_filter && filtered.height() == 0 {
        return Err(AggregateError::MissingCategory {
            year: year.to_string(),
            cause: cause.describe(ALL_CAUSES),
            region: region.describe(ALL_REGIONS),
        });
    }

    // Coerce the selected sum to an integer
    let totals = filtered.column(TOTAL_COL)?.cast(&DataType::Int64)?;
    Ok(totals.i64()?.sum().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn year_2019() -> DataFrame {
        df!(
            REGION_COL => ["SP", "SP", "RJ"],
            CAUSE_COL => ["X", "Y", "X"],
            TOTAL_COL => [10i64, 5, 3],
        )
        .unwrap()
    }

    fn year_2020() -> DataFrame {
        df!(
            REGION_COL => ["SP", "RJ"],
            CAUSE_COL => ["X", "Y"],
            TOTAL_COL => [7i64, 2],
        )
        .unwrap()
    }

    #[test]
    fn all_causes_all_regions_sums_everything() {
        let data = vec![("2019".to_string(), year_2019())];
        let totals = comparison_totals(&data, &Selection::All, &Selection::All).unwrap();
        assert_eq!(
            totals,
            vec![YearlyTotal {
                year: "2019".to_string(),
                total: 18
            }]
        );
    }

    #[test]
    fn specific_cause_all_regions() {
        let data = vec![("2019".to_string(), year_2019())];
        let totals = comparison_totals(
            &data,
            &Selection::Only("X".to_string()),
            &Selection::All,
        )
        .unwrap();
        assert_eq!(totals[0].total, 13);
    }

    #[test]
    fn all_causes_specific_region() {
        let data = vec![("2019".to_string(), year_2019())];
        let totals = comparison_totals(
            &data,
            &Selection::All,
            &Selection::Only("SP".to_string()),
        )
        .unwrap();
        assert_eq!(totals[0].total, 15);
    }

    #[test]
    fn specific_cause_specific_region() {
        let data = vec![("2019".to_string(), year_2019())];
        let totals = comparison_totals(
            &data,
            &Selection::Only("X".to_string()),
            &Selection::Only("SP".to_string()),
        )
        .unwrap();
        assert_eq!(totals[0].total, 10);
    }

    #[test]
    fn missing_pair_is_an_error_not_zero() {
        let data = vec![("2019".to_string(), year_2019())];
        let result = comparison_totals(
            &data,
            &Selection::Only("Y".to_string()),
            &Selection::Only("RJ".to_string()),
        );
        match result {
            Err(AggregateError::MissingCategory { year, cause, region }) => {
                assert_eq!(year, "2019");
                assert_eq!(cause, "Y");
                assert_eq!(region, "RJ");
            }
            other => panic!("expected MissingCategory, got {:?}", other),
        }
    }

    #[test]
    fn one_row_per_year_in_input_order() {
        let data = vec![
            ("2020".to_string(), year_2020()),
            ("2019".to_string(), year_2019()),
        ];
        let totals = comparison_totals(&data, &Selection::All, &Selection::All).unwrap();
        assert_eq!(totals.len(), data.len());
        assert_eq!(totals[0].year, "2020");
        assert_eq!(totals[0].total, 9);
        assert_eq!(totals[1].year, "2019");
        assert_eq!(totals[1].total, 18);
    }

    #[test]
    fn empty_table_without_filters_sums_to_zero() {
        let empty = df!(
            REGION_COL => Vec::<String>::new(),
            CAUSE_COL => Vec::<String>::new(),
            TOTAL_COL => Vec::<i64>::new(),
        )
        .unwrap();
        let data = vec![("2021".to_string(), empty)];
        let totals = comparison_totals(&data, &Selection::All, &Selection::All).unwrap();
        assert_eq!(totals[0].total, 0);
    }

    #[test]
    fn selection_from_label_handles_sentinels() {
        assert_eq!(Selection::from_label(ALL_CAUSES, ALL_CAUSES), Selection::All);
        assert_eq!(Selection::from_label("", ALL_REGIONS), Selection::All);
        assert_eq!(
            Selection::from_label("SP", ALL_REGIONS),
            Selection::Only("SP".to_string())
        );
    }
}
