use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::aggregate::{GroupQuery, group_average as average_by_group};
use crate::analyzers::bucket::{BucketSpec, bucket};
use crate::analyzers::filter::{FilterQuery, filter_values as select_matching};
use crate::analyzers::frequency::distinct;
use crate::analyzers::sort::sort_by_column;
use crate::analyzers::types::{BucketCounts, ColumnStats, Distinct};
use crate::analyzers::utility::{describe, mode};
use crate::coaster::Coaster;
use crate::output::{write_buckets, write_empty, write_stats, write_table};
use crate::parser::Table;

/// Where to read from and how fields are separated.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    pub path: &'a Path,
    pub delimiter: char,
}

impl<'a> Source<'a> {
    pub fn new(path: &'a Path, delimiter: char) -> Self {
        Source { path, delimiter }
    }

    fn load(&self) -> Result<Table> {
        Ok(Table::load(self.path, self.delimiter)?)
    }
}

/// Most frequent parsable number in `column`.
#[tracing::instrument(skip(source), fields(path = %source.path.display()))]
pub fn most_common_value(source: Source<'_>, column: &str) -> Result<Option<f64>> {
    let table = source.load()?;
    if table.is_empty() {
        return Ok(None);
    }

    let values = table.numeric_column(column)?;
    debug!(values = values.len(), "Column extracted");
    Ok(mode(&values))
}

/// Sorted distinct non-blank values of `column`.
#[tracing::instrument(skip(source), fields(path = %source.path.display()))]
pub fn distinct_values(source: Source<'_>, column: &str) -> Result<Distinct> {
    let table = source.load()?;
    if table.is_empty() {
        return Ok(distinct(Vec::new()));
    }

    Ok(distinct(table.column(column)?))
}

/// Selected values of every record passing the query.
#[tracing::instrument(skip(source, query), fields(path = %source.path.display(), select = %query.select))]
pub fn filter_values(source: Source<'_>, query: &FilterQuery) -> Result<Vec<String>> {
    let table = source.load()?;
    if table.is_empty() {
        return Ok(Vec::new());
    }

    Ok(select_matching(&table, query)?)
}

/// Group means, keyed by group and sorted.
#[tracing::instrument(skip(source), fields(path = %source.path.display()))]
pub fn group_average(source: Source<'_>, query: &GroupQuery) -> Result<BTreeMap<String, f64>> {
    let table = source.load()?;
    if table.is_empty() {
        return Ok(BTreeMap::new());
    }

    Ok(average_by_group(&table, query)?)
}

/// Every coaster in the file.
#[tracing::instrument(skip(source), fields(path = %source.path.display()))]
pub fn load_coasters(source: Source<'_>) -> Result<Vec<Coaster>> {
    let table = source.load()?;
    if table.is_empty() {
        return Ok(Vec::new());
    }

    Ok(Coaster::from_table(&table)?)
}

/// Sorts the input by `column` and writes header plus rows to `output`.
///
/// Returns the number of data rows written.
#[tracing::instrument(skip(source), fields(input = %source.path.display(), output = %output.display()))]
pub fn sort_and_write(source: Source<'_>, output: &Path, column: &str) -> Result<usize> {
    let table = source.load()?;
    if table.is_empty() {
        write_empty(output)?;
        return Ok(0);
    }

    let sorted = sort_by_column(table, column)?;
    let written = write_table(output, &sorted)?;

    info!(rows = written, "Sorted table written");
    Ok(written)
}

/// Buckets the input and writes one line per kept row to `output`.
#[tracing::instrument(skip(source, spec), fields(input = %source.path.display(), output = %output.display()))]
pub fn bucket_and_write(source: Source<'_>, output: &Path, spec: &BucketSpec) -> Result<BucketCounts> {
    let table = source.load()?;
    if table.is_empty() {
        write_empty(output)?;
        return Ok(BucketCounts::default());
    }

    let rows = bucket(&table, spec)?;
    write_buckets(output, &rows, &spec.id_columns, &spec.value_column)?;

    let counts = BucketCounts::from_rows(&rows);
    info!(
        low = counts.low,
        medium = counts.medium,
        high = counts.high,
        "Buckets written"
    );
    Ok(counts)
}

/// Describes each of `columns` and writes the statistics table to `output`.
#[tracing::instrument(skip(source), fields(input = %source.path.display(), output = %output.display()))]
pub fn describe_and_write(
    source: Source<'_>,
    output: &Path,
    columns: &[String],
) -> Result<Vec<ColumnStats>> {
    let table = source.load()?;
    if table.is_empty() {
        write_empty(output)?;
        return Ok(Vec::new());
    }

    let stats = columns
        .iter()
        .map(|column| -> Result<ColumnStats> {
            let values = table.numeric_column(column)?;
            Ok(ColumnStats {
                column: column.clone(),
                stats: describe(&values),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    write_stats(output, &stats)?;

    info!(columns = stats.len(), "Statistics written");
    Ok(stats)
}
