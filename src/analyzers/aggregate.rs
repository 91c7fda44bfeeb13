use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::parser::{Table, parse_float};

/// Mean of `value_column` per distinct `group_column`, over rows whose
/// `filter_column` equals `filter_value` exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupQuery {
    pub group_column: String,
    pub value_column: String,
    pub filter_column: String,
    pub filter_value: String,
}

impl Default for GroupQuery {
    fn default() -> Self {
        GroupQuery {
            group_column: "theme".to_string(),
            value_column: "intensity".to_string(),
            filter_column: "excitement_rating".to_string(),
            filter_value: "High".to_string(),
        }
    }
}

/// Averages a numeric column per group.
///
/// Rows whose value does not parse count toward neither the sum nor the
/// count of their group. A group with no qualifying rows is absent from the
/// result. Keys come back sorted.
pub fn group_average(table: &Table, query: &GroupQuery) -> Result<BTreeMap<String, f64>> {
    let header = table.header();
    let group_index = header.index_of(&query.group_column)?;
    let value_index = header.index_of(&query.value_column)?;
    let filter_index = header.index_of(&query.filter_column)?;

    let mut series: HashMap<&str, (f64, usize)> = HashMap::new();

    for record in table.records() {
        if record.get(filter_index) != Some(query.filter_value.as_str()) {
            continue;
        }

        let (Some(group), Some(value)) = (
            record.get(group_index),
            record.get(value_index).and_then(parse_float),
        ) else {
            continue;
        };

        let entry = series.entry(group).or_default();
        entry.0 += value;
        entry.1 += 1;
    }

    Ok(series
        .into_iter()
        .map(|(group, (sum, count))| (group.to_string(), sum / count as f64))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::parse(
            "theme,excitement_rating,intensity\n\
             Water,High,6.0\n\
             Water,High,8.0\n\
             Water,Low,100.0\n\
             Space,High,5.5\n\
             Space,High,n/a\n\
             Jungle,Medium,7.0\n\
             Jungle,High,\n",
            ',',
        )
    }

    #[test]
    fn test_group_average_matches_sum_over_count() {
        let averages = group_average(&sample(), &GroupQuery::default()).unwrap();

        assert_eq!(averages.get("Water"), Some(&7.0));
        assert_eq!(averages.get("Space"), Some(&5.5));
    }

    #[test]
    fn test_groups_without_qualifying_rows_are_absent() {
        let averages = group_average(&sample(), &GroupQuery::default()).unwrap();

        assert!(!averages.contains_key("Jungle"));
        assert_eq!(averages.len(), 2);
        assert!(averages.values().all(|v| v.is_finite()));
    }

    #[test]
    fn test_keys_sorted() {
        let averages = group_average(&sample(), &GroupQuery::default()).unwrap();
        let keys: Vec<&String> = averages.keys().collect();
        assert_eq!(keys, vec!["Space", "Water"]);
    }

    #[test]
    fn test_missing_column() {
        let table = Table::parse("theme,intensity\nWater,5\n", ',');
        assert!(group_average(&table, &GroupQuery::default()).is_err());
    }
}
