use crate::error::NoMatchError;

use super::model::{CompanyRow, Dataset, Metrics};

// ---------------------------------------------------------------------------
// Selection filter
// ---------------------------------------------------------------------------

/// Rows matching one selected company, borrowed from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredRows<'a> {
    pub company: String,
    pub rows: Vec<&'a CompanyRow>,
}

/// Return every row whose company equals `key`, in dataset order.
pub fn filter_by_company<'a>(dataset: &'a Dataset, key: &str) -> FilteredRows<'a> {
    FilteredRows {
        company: key.to_string(),
        rows: dataset.rows.iter().filter(|row| row.company == key).collect(),
    }
}

/// Metrics of the first matching row.
///
/// An empty selection is an error, never a row of zeros.
pub fn first_metrics(filtered: &FilteredRows<'_>) -> Result<Metrics, NoMatchError> {
    filtered
        .rows
        .first()
        .map(|row| row.metrics())
        .ok_or_else(|| NoMatchError {
            company: filtered.company.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            CompanyRow::new("ACME", 10.0, 1.0, 5.0),
            CompanyRow::new("GLOBEX", 0.0, 0.0, 0.0),
            CompanyRow::new("ACME", 99.0, 9.0, 9.0),
        ])
    }

    #[test]
    fn first_metrics_are_the_first_rows_literal_values() {
        let ds = dataset();
        let metrics = first_metrics(&filter_by_company(&ds, "ACME")).unwrap();
        assert_eq!(
            metrics,
            Metrics {
                value: 10.0,
                change_abs: 1.0,
                change_pct: 5.0
            }
        );
    }

    #[test]
    fn filtering_is_repeatable() {
        let ds = dataset();
        let a = filter_by_company(&ds, "ACME");
        let b = filter_by_company(&ds, "ACME");
        assert_eq!(a, b);
        assert_eq!(a.rows.len(), 2);
    }

    #[test]
    fn unknown_company_is_no_match_not_zero() {
        let ds = dataset();
        let filtered = filter_by_company(&ds, "NONEXISTENT");
        assert!(filtered.rows.is_empty());
        assert_eq!(
            first_metrics(&filtered),
            Err(NoMatchError {
                company: "NONEXISTENT".to_string()
            })
        );
    }

    #[test]
    fn zero_valued_company_still_matches() {
        let ds = dataset();
        let metrics = first_metrics(&filter_by_company(&ds, "GLOBEX")).unwrap();
        assert_eq!(metrics.value, 0.0);
    }
}
