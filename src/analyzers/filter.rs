use crate::error::Result;
use crate::parser::{Header, Record, Table, parse_float};

/// A test on a single named column.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact, case-sensitive string match on the trimmed field.
    Equals { column: String, value: String },
    /// Numeric comparison; a field that does not parse fails the test.
    GreaterThan { column: String, threshold: f64 },
}

impl Predicate {
    fn column(&self) -> &str {
        match self {
            Predicate::Equals { column, .. } | Predicate::GreaterThan { column, .. } => column,
        }
    }

    fn matches(&self, field: &str) -> bool {
        match self {
            Predicate::Equals { value, .. } => field == value,
            Predicate::GreaterThan { threshold, .. } => {
                parse_float(field).is_some_and(|v| v > *threshold)
            }
        }
    }
}

/// Selects one column from every record passing all predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub select: String,
    pub predicates: Vec<Predicate>,
}

impl Default for FilterQuery {
    fn default() -> Self {
        FilterQuery {
            select: "rollercoaster_type".to_string(),
            predicates: vec![
                Predicate::Equals {
                    column: "excitement_rating".to_string(),
                    value: "Medium".to_string(),
                },
                Predicate::GreaterThan {
                    column: "intensity".to_string(),
                    threshold: 5.40,
                },
            ],
        }
    }
}

struct Compiled<'q> {
    select: usize,
    tests: Vec<(usize, &'q Predicate)>,
}

impl<'q> Compiled<'q> {
    fn new(header: &Header, query: &'q FilterQuery) -> Result<Self> {
        let select = header.index_of(&query.select)?;
        let tests = query
            .predicates
            .iter()
            .map(|p| header.index_of(p.column()).map(|index| (index, p)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Compiled { select, tests })
    }

    fn accepts(&self, record: &Record) -> bool {
        self.tests
            .iter()
            .all(|(index, p)| record.get(*index).is_some_and(|field| p.matches(field)))
    }
}

/// Values of `query.select` for every record satisfying every predicate,
/// in input order.
pub fn filter_values(table: &Table, query: &FilterQuery) -> Result<Vec<String>> {
    let compiled = Compiled::new(table.header(), query)?;

    Ok(table
        .records()
        .iter()
        .filter(|record| compiled.accepts(record))
        .filter_map(|record| record.get(compiled.select))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medium_excitement_above_intensity() {
        let table = Table::parse(
            "rollercoaster_type,excitement_rating,intensity\n\
             A,Medium,6.0\n\
             B,Medium,5.0\n\
             C,High,9.0\n",
            ',',
        );

        let result = filter_values(&table, &FilterQuery::default()).unwrap();
        assert_eq!(result, vec!["A"]);
    }

    #[test]
    fn test_unparsable_numbers_excluded() {
        let table = Table::parse(
            "rollercoaster_type,excitement_rating,intensity\n\
             A,Medium,high\n\
             B,Medium,\n\
             C,Medium,5.41\n",
            ',',
        );

        let result = filter_values(&table, &FilterQuery::default()).unwrap();
        assert_eq!(result, vec!["C"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let table = Table::parse(
            "rollercoaster_type,excitement_rating,intensity\nA,Medium,5.40\n",
            ',',
        );
        assert!(filter_values(&table, &FilterQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        let table = Table::parse(
            "rollercoaster_type,excitement_rating,intensity\nA,medium,9\n",
            ',',
        );
        assert!(filter_values(&table, &FilterQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_predicate_column() {
        let table = Table::parse("rollercoaster_type,excitement_rating\nA,Medium\n", ',');
        assert!(filter_values(&table, &FilterQuery::default()).is_err());
    }
}
