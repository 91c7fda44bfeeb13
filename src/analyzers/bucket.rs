use std::collections::HashSet;
use std::fmt::Display;

use serde::Serialize;

use crate::analyzers::types::BucketRow;
use crate::error::Result;
use crate::parser::{Table, parse_float};

/// Speed band a row falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bucket {
    Low,
    Medium,
    High,
}

impl Bucket {
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Low => "Low",
            Bucket::Medium => "Medium",
            Bucket::High => "High",
        }
    }

    fn slot(&self) -> usize {
        match self {
            Bucket::Low => 0,
            Bucket::Medium => 1,
            Bucket::High => 2,
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Both ends of the Medium band are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            low: 10.0,
            high: 15.0,
        }
    }
}

/// Places a value into a band.
///
/// | Range               | Bucket |
/// |---------------------|--------|
/// | < low               | Low    |
/// | > high              | High   |
/// | otherwise           | Medium |
pub fn classify(value: f64, thresholds: &Thresholds) -> Bucket {
    match value {
        v if v < thresholds.low => Bucket::Low,
        v if v > thresholds.high => Bucket::High,
        _ => Bucket::Medium,
    }
}

/// Which columns a bucketing pass reads.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSpec {
    pub value_column: String,
    pub id_columns: Vec<String>,
    pub thresholds: Thresholds,
}

impl Default for BucketSpec {
    fn default() -> Self {
        BucketSpec {
            value_column: "avg_speed".to_string(),
            id_columns: vec![
                "park_id".to_string(),
                "theme".to_string(),
                "rollercoaster_type".to_string(),
            ],
            thresholds: Thresholds::default(),
        }
    }
}

/// Splits the records of `table` into Low, Medium and High rows.
///
/// Rows whose value does not parse are left out. Within a bucket, a row whose
/// ids and two-decimal value match an earlier row is dropped; the same row
/// may still appear once in each of the other buckets. The result lists all
/// Low rows, then Medium, then High, each in input order.
pub fn bucket(table: &Table, spec: &BucketSpec) -> Result<Vec<BucketRow>> {
    let header = table.header();
    let value_index = header.index_of(&spec.value_column)?;
    let id_names: Vec<&str> = spec.id_columns.iter().map(String::as_str).collect();
    let id_indices = header.indices_of(&id_names)?;

    let mut seen: [HashSet<(Vec<String>, String)>; 3] = Default::default();
    let mut kept: [Vec<BucketRow>; 3] = Default::default();

    for record in table.records() {
        let Some(value) = record.get(value_index).and_then(parse_float) else {
            continue;
        };

        let ids: Vec<String> = id_indices
            .iter()
            .map(|&i| record.get(i).unwrap_or("").to_string())
            .collect();
        let formatted = format!("{:.2}", value);
        let bucket = classify(value, &spec.thresholds);
        let slot = bucket.slot();

        if seen[slot].insert((ids.clone(), formatted.clone())) {
            kept[slot].push(BucketRow {
                bucket,
                ids,
                value: formatted,
            });
        }
    }

    Ok(kept.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::BucketCounts;

    #[test]
    fn test_classify_boundaries() {
        let t = Thresholds::default();
        assert_eq!(classify(9.99, &t), Bucket::Low);
        assert_eq!(classify(10.0, &t), Bucket::Medium);
        assert_eq!(classify(15.0, &t), Bucket::Medium);
        assert_eq!(classify(15.01, &t), Bucket::High);
    }

    fn speeds(rows: &[BucketRow], bucket: Bucket) -> Vec<&str> {
        rows.iter()
            .filter(|r| r.bucket == bucket)
            .map(|r| r.value.as_str())
            .collect()
    }

    #[test]
    fn test_bucket_groups_and_suppresses_duplicates() {
        let table = Table::parse(
            "park_id,theme,rollercoaster_type,avg_speed\n\
             1,Water,Wooden,9\n\
             2,Space,Steel,10\n\
             3,Jungle,Hyper,12\n\
             4,Water,Flying,16\n\
             3,Jungle,Hyper,12.001\n",
            ',',
        );
        let rows = bucket(&table, &BucketSpec::default()).unwrap();

        assert_eq!(speeds(&rows, Bucket::Low), vec!["9.00"]);
        assert_eq!(speeds(&rows, Bucket::Medium), vec!["10.00", "12.00"]);
        assert_eq!(speeds(&rows, Bucket::High), vec!["16.00"]);

        let order: Vec<Bucket> = rows.iter().map(|r| r.bucket).collect();
        assert_eq!(
            order,
            vec![Bucket::Low, Bucket::Medium, Bucket::Medium, Bucket::High]
        );
        assert_eq!(rows[2].ids, vec!["3", "Jungle", "Hyper"]);
    }

    #[test]
    fn test_bucket_output_grouped_despite_input_order() {
        let table = Table::parse(
            "park_id,theme,rollercoaster_type,avg_speed\n\
             1,A,X,20\n\
             2,B,Y,5\n\
             3,C,Z,11\n\
             4,D,W,3\n",
            ',',
        );
        let rows = bucket(&table, &BucketSpec::default()).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.ids[0].as_str()).collect();

        assert_eq!(ids, vec!["2", "4", "3", "1"]);
        assert_eq!(
            BucketCounts::from_rows(&rows),
            BucketCounts {
                low: 2,
                medium: 1,
                high: 1
            }
        );
    }

    #[test]
    fn test_duplicates_only_suppressed_within_a_bucket() {
        let table = Table::parse(
            "park_id,theme,rollercoaster_type,avg_speed\n\
             1,A,X,9.999\n\
             1,A,X,10.0\n\
             1,A,X,10.001\n",
            ',',
        );
        let rows = bucket(&table, &BucketSpec::default()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bucket, Bucket::Low);
        assert_eq!(rows[1].bucket, Bucket::Medium);
        for row in &rows {
            assert_eq!(row.ids, vec!["1", "A", "X"]);
            assert_eq!(row.value, "10.00");
        }
    }

    #[test]
    fn test_bucket_skips_unparsable_values() {
        let table = Table::parse(
            "park_id,theme,rollercoaster_type,avg_speed\n1,A,X,fast\n2,B,Y,\n",
            ',',
        );
        assert!(bucket(&table, &BucketSpec::default()).unwrap().is_empty());
    }

    #[test]
    fn test_bucket_missing_column() {
        let table = Table::parse("park_id,theme\n1,A\n", ',');
        assert!(bucket(&table, &BucketSpec::default()).is_err());
    }
}
