//! Result types returned by the aggregators.

use serde::Serialize;

use crate::analyzers::bucket::Bucket;

/// Distinct non-blank values of one column, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distinct {
    pub values: Vec<String>,
    pub count: usize,
}

/// One kept row of a bucketing pass.
///
/// `value` is already formatted to two decimals; that string is also what
/// duplicate detection compares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketRow {
    pub bucket: Bucket,
    pub ids: Vec<String>,
    pub value: String,
}

/// Rows kept per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl BucketCounts {
    pub fn from_rows(rows: &[BucketRow]) -> Self {
        let mut counts = BucketCounts::default();
        for row in rows {
            match row.bucket {
                Bucket::Low => counts.low += 1,
                Bucket::Medium => counts.medium += 1,
                Bucket::High => counts.high += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// Summary statistics for one numeric column. `None` means the column had
/// no values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub max: Option<f64>,
    pub median: Option<f64>,
    pub mean: Option<f64>,
    pub mode: Option<f64>,
}

/// Statistics labelled with the column they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub stats: DescriptiveStats,
}
