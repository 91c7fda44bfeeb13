use crate::error::Result;
use crate::parser::{Record, Table, parse_float};

/// Integer part of a field, kept as `f64` so keys past the `i64` range still
/// order by size. Unparsable and non-finite fields are 0.
fn sort_key(record: &Record, index: usize) -> f64 {
    record
        .get(index)
        .and_then(parse_float)
        .filter(|value| value.is_finite())
        // -0.0 would order ahead of 0.0 under total_cmp
        .map(|value| value.trunc() + 0.0)
        .unwrap_or(0.0)
}

/// Reorders the records of `table` ascending by the integer value of `column`.
///
/// Keys that do not parse count as 0, so those rows sort toward the front
/// instead of being dropped. Equal keys keep their input order.
pub fn sort_by_column(table: Table, column: &str) -> Result<Table> {
    let index = table.header().index_of(column)?;
    let delimiter = table.delimiter();
    let header = table.header().clone();

    let mut records = table.into_records();
    records.sort_by(|a, b| sort_key(a, index).total_cmp(&sort_key(b, index)));

    Ok(Table::from_parts(header, records, delimiter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(table: &Table) -> Vec<&str> {
        table
            .records()
            .iter()
            .map(|r| r.get(1).unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_sort_ascending_and_stable() {
        let table = Table::parse(
            "park_id,name\n3,a\n1,b\n3,c\n2,d\n1,e\n",
            ',',
        );
        let sorted = sort_by_column(table, "park_id").unwrap();

        assert_eq!(ids(&sorted), vec!["b", "e", "d", "a", "c"]);
    }

    #[test]
    fn test_unparsable_keys_sort_as_zero() {
        let table = Table::parse("park_id,name\n2,a\n?,b\n-1,c\n,d\n", ',');
        let sorted = sort_by_column(table, "park_id").unwrap();

        assert_eq!(ids(&sorted), vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn test_fractional_keys_truncate() {
        let table = Table::parse("park_id,name\n1.9,a\n1.1,b\n0.5,c\n", ',');
        let sorted = sort_by_column(table, "park_id").unwrap();

        assert_eq!(ids(&sorted), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_keys_beyond_i64_keep_their_order() {
        let table = Table::parse(
            "park_id,name\n1e20,a\n2e19,b\n1e19,c\n5,d\n",
            ',',
        );
        let sorted = sort_by_column(table, "park_id").unwrap();

        assert_eq!(ids(&sorted), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_keys_truncating_to_zero_tie() {
        let table = Table::parse("park_id,name\n0.3,a\n-0.5,b\nx,c\n", ',');
        let sorted = sort_by_column(table, "park_id").unwrap();

        assert_eq!(ids(&sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_sort_column() {
        let table = Table::parse("name\na\n", ',');
        assert!(sort_by_column(table, "park_id").is_err());
    }
}
