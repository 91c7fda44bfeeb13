//! Output formatting and persistence for aggregation results.
//!
//! Delimited files are written with the `csv` crate with quoting turned off,
//! so every field lands in the file exactly as it was read. A rewritten input
//! keeps the input delimiter; bucket and statistics tables are always
//! comma-separated.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use serde::Serialize;
use tracing::debug;

use crate::analyzers::types::{BucketRow, ColumnStats, DescriptiveStats};
use crate::error::Error;
use crate::parser::Table;

const RESULT_DELIMITER: char = ',';

/// Prints any result to stdout as pretty JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open_writer(path: &Path, delimiter: char) -> Result<Writer<File>> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("delimiter {delimiter:?} is not a single ASCII byte"))?;

    let file = File::create(path).map_err(|e| Error::io(path, e))?;

    Ok(WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file))
}

fn finish(mut writer: Writer<File>, path: &Path) -> Result<()> {
    writer.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Creates (or truncates) `path` as an empty file.
pub fn write_empty(path: &Path) -> Result<()> {
    File::create(path).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), "Wrote empty output");
    Ok(())
}

/// Writes the header line as it was read, then every record of `table`.
/// Returns the number of data rows written.
pub fn write_table(path: &Path, table: &Table) -> Result<usize> {
    let mut writer = open_writer(path, table.delimiter())?;

    writer
        .write_record(table.header().raw_names())
        .map_err(Error::from)?;
    for record in table.records() {
        writer.write_record(record.fields()).map_err(Error::from)?;
    }
    finish(writer, path)?;

    let written = table.records().len();
    debug!(path = %path.display(), rows = written, "Wrote table");
    Ok(written)
}

/// Writes bucketed rows under `category,<id columns>,<value column>`.
pub fn write_buckets(
    path: &Path,
    rows: &[BucketRow],
    id_columns: &[String],
    value_column: &str,
) -> Result<()> {
    let mut writer = open_writer(path, RESULT_DELIMITER)?;

    let mut header = vec!["category"];
    header.extend(id_columns.iter().map(String::as_str));
    header.push(value_column);
    writer.write_record(&header).map_err(Error::from)?;

    for row in rows {
        let mut line = vec![row.bucket.label()];
        line.extend(row.ids.iter().map(String::as_str));
        line.push(&row.value);
        writer.write_record(&line).map_err(Error::from)?;
    }
    finish(writer, path)?;

    debug!(path = %path.display(), rows = rows.len(), "Wrote buckets");
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// Writes a `metric,<column>...` table with one line per statistic.
///
/// Values use two decimals; an undefined statistic is an empty cell.
pub fn write_stats(path: &Path, columns: &[ColumnStats]) -> Result<()> {
    let mut writer = open_writer(path, RESULT_DELIMITER)?;

    let mut header = vec!["metric".to_string()];
    header.extend(columns.iter().map(|c| c.column.clone()));
    writer.write_record(&header).map_err(Error::from)?;

    let metrics: [(&str, fn(&DescriptiveStats) -> Option<f64>); 4] = [
        ("max", |s| s.max),
        ("median", |s| s.median),
        ("mean", |s| s.mean),
        ("mode", |s| s.mode),
    ];

    for (name, pick) in metrics {
        let mut line = vec![name.to_string()];
        line.extend(columns.iter().map(|c| cell(pick(&c.stats))));
        writer.write_record(&line).map_err(Error::from)?;
    }
    finish(writer, path)?;

    debug!(path = %path.display(), columns = columns.len(), "Wrote statistics");
    Ok(())
}
