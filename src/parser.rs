//! Delimited-text reader for rollercoaster files.
//!
//! The first non-blank line names the columns. Every later line is split into
//! at most as many fields as the header has, so delimiter characters inside
//! the final field stay part of that field. Lines that come up short are
//! dropped without complaint.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_DELIMITER: char = ',';

/// Reads `path` and returns its non-blank lines with line endings removed.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or is not valid UTF-8.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

/// Lenient numeric coercion. Anything that does not parse is `None`.
pub fn parse_float(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}

/// Parses as a float and truncates toward zero.
///
/// `"3.9"` becomes `3`. Non-finite values have no integer form and are `None`.
pub fn parse_int(field: &str) -> Option<i64> {
    parse_float(field)
        .filter(|value| value.is_finite())
        .map(|value| value.trunc() as i64)
}

/// Ordered column names taken from the first line of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
    // names as written, padding included
    raw: Vec<String>,
}

impl Header {
    pub fn parse(line: &str, delimiter: char) -> Self {
        let raw: Vec<String> = line.split(delimiter).map(str::to_string).collect();
        Header {
            columns: raw.iter().map(|name| name.trim().to_string()).collect(),
            raw,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.columns
    }

    /// Column names exactly as they appeared in the header line.
    pub fn raw_names(&self) -> &[String] {
        &self.raw
    }

    /// Position of `name` in the header. The first match wins.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| Error::missing_column(name))
    }

    /// Resolves several names at once, failing on the first absent one.
    pub fn indices_of(&self, names: &[&str]) -> Result<Vec<usize>> {
        names.iter().map(|name| self.index_of(name)).collect()
    }
}

/// One data row as trimmed string fields, positioned by the [`Header`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(Vec<String>);

impl Record {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Record {
    fn from(fields: Vec<String>) -> Self {
        Record(fields)
    }
}

/// Splits `line` into exactly `column_count` trimmed fields.
///
/// Returns `None` for blank lines and for lines with fewer fields than the
/// header. Extra delimiters end up inside the last field.
pub fn split_record(line: &str, column_count: usize, delimiter: char) -> Option<Record> {
    if column_count == 0 || line.trim().is_empty() {
        return None;
    }

    let fields: Vec<String> = line
        .splitn(column_count, delimiter)
        .map(|field| field.trim().to_string())
        .collect();

    if fields.len() < column_count {
        return None;
    }

    Some(Record(fields))
}

/// A whole file: the header plus every well-formed record, in file order.
#[derive(Debug, Clone)]
pub struct Table {
    header: Header,
    records: Vec<Record>,
    delimiter: char,
}

impl Table {
    /// Reads and parses the file at `path`.
    ///
    /// An empty file gives a table with an empty header and no records.
    pub fn load(path: impl AsRef<Path>, delimiter: char) -> Result<Self> {
        let path = path.as_ref();
        let lines = read_lines(path)?;
        let table = Self::from_lines(lines, delimiter);

        debug!(
            path = %path.display(),
            columns = table.header.len(),
            records = table.records.len(),
            "Table loaded"
        );

        Ok(table)
    }

    pub fn parse(text: &str, delimiter: char) -> Self {
        Self::from_lines(text.lines(), delimiter)
    }

    pub fn from_lines<I, S>(lines: I, delimiter: char) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines
            .into_iter()
            .filter(|line| !line.as_ref().trim().is_empty());

        let header = match lines.next() {
            Some(line) => Header::parse(line.as_ref(), delimiter),
            None => Header::default(),
        };

        let records = lines
            .filter_map(|line| split_record(line.as_ref(), header.len(), delimiter))
            .collect();

        Table {
            header,
            records,
            delimiter,
        }
    }

    pub fn from_parts(header: Header, records: Vec<Record>, delimiter: char) -> Self {
        Table {
            header,
            records,
            delimiter,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// True when the file had no header line at all.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }

    /// Every value of one column, in record order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let index = self.header.index_of(name)?;
        Ok(self
            .records
            .iter()
            .filter_map(|record| record.get(index))
            .collect())
    }

    /// The parsable numbers of one column. Cells that do not parse are skipped.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self
            .column(name)?
            .into_iter()
            .filter_map(parse_float)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_trims_names() {
        let header = Header::parse(" park_id , theme,avg_speed ", ',');
        assert_eq!(header.names(), &["park_id", "theme", "avg_speed"]);
        assert_eq!(header.len(), 3);
    }

    #[test]
    fn test_header_keeps_raw_names() {
        let header = Header::parse(" park_id ,theme", ',');
        assert_eq!(header.raw_names(), &[" park_id ", "theme"]);
        assert_eq!(header.index_of("park_id").unwrap(), 0);
    }

    #[test]
    fn test_header_first_match_wins() {
        let header = Header::parse("a,b,a", ',');
        assert_eq!(header.index_of("a").unwrap(), 0);
    }

    #[test]
    fn test_header_missing_column() {
        let header = Header::parse("a,b", ',');
        let err = header.index_of("c").unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref name) if name == "c"));
    }

    #[test]
    fn test_indices_of_fails_on_first_absent() {
        let header = Header::parse("a,b,c", ',');
        assert_eq!(header.indices_of(&["c", "a"]).unwrap(), vec![2, 0]);
        assert!(header.indices_of(&["a", "z"]).is_err());
    }

    #[test]
    fn test_split_record_last_field_absorbs_delimiters() {
        let record = split_record("1, Water , a, b, c", 3, ',').unwrap();
        assert_eq!(record.fields(), &["1", "Water", "a, b, c"]);
    }

    #[test]
    fn test_split_record_short_row_is_dropped() {
        assert!(split_record("1,2", 3, ',').is_none());
    }

    #[test]
    fn test_split_record_blank_row_is_dropped() {
        assert!(split_record("   ", 3, ',').is_none());
    }

    #[test]
    fn test_split_record_custom_delimiter() {
        let record = split_record("a;b;c", 3, ';').unwrap();
        assert_eq!(record.get(2), Some("c"));
    }

    #[test]
    fn test_table_parse_skips_malformed_rows() {
        let table = Table::parse("a,b,c\n1,2,3\n\n4,5\n6,7,8,9\n", ',');
        assert_eq!(table.records().len(), 2);
        assert!(table.records().iter().all(|r| r.len() == table.header().len()));
        assert_eq!(table.records()[1].get(2), Some("8,9"));
    }

    #[test]
    fn test_table_parse_empty_text() {
        let table = Table::parse("", ',');
        assert!(table.is_empty());
        assert!(table.records().is_empty());
    }

    #[test]
    fn test_numeric_column_skips_unparsable() {
        let table = Table::parse("name,speed\nx,1.5\ny,fast\nz,3\n", ',');
        assert_eq!(table.numeric_column("speed").unwrap(), vec![1.5, 3.0]);
        assert!(table.numeric_column("height").is_err());
    }

    #[test]
    fn test_parse_int_truncates() {
        assert_eq!(parse_int("3.9"), Some(3));
        assert_eq!(parse_int("-2.5"), Some(-2));
        assert_eq!(parse_int(" 7 "), Some(7));
        assert_eq!(parse_int("inf"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("5.40"), Some(5.4));
        assert_eq!(parse_float("n/a"), None);
    }
}
