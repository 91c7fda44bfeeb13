//! CLI entry point for the coaster statistics tool.
//!
//! Every subcommand reads one delimited coaster file, runs a single
//! aggregation, and reports the result or writes it to a new file.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use coaster_stats::analyzers::aggregate::GroupQuery;
use coaster_stats::analyzers::analyzer::{
    Source, bucket_and_write, describe_and_write, distinct_values, filter_values, group_average,
    load_coasters, most_common_value, sort_and_write,
};
use coaster_stats::analyzers::bucket::{BucketSpec, Thresholds};
use coaster_stats::analyzers::filter::{FilterQuery, Predicate};
use coaster_stats::config::{Settings, parse_delimiter};
use coaster_stats::output::print_json;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "coaster_stats")]
#[command(about = "Aggregations over a rollercoaster CSV file", long_about = None)]
struct Cli {
    /// Input file (overrides config and COASTER_CSV)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Field delimiter; use \t for tab
    #[arg(short, long, global = true, value_parser = parse_delimiter)]
    delimiter: Option<char>,

    /// JSON settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the result as JSON on stdout
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Most frequent value of a numeric column
    MostCommon {
        #[arg(long, default_value = "avg_speed")]
        column: String,
    },
    /// Sorted distinct values of a column
    Distinct {
        #[arg(long, default_value = "rollercoaster_type")]
        column: String,
    },
    /// Values of one column where an equality and a greater-than test both hold
    Filter {
        #[arg(long, default_value = "rollercoaster_type")]
        select: String,
        #[arg(long, default_value = "excitement_rating")]
        equals_column: String,
        #[arg(long, default_value = "Medium")]
        equals_value: String,
        #[arg(long, default_value = "intensity")]
        above_column: String,
        #[arg(long, default_value_t = 5.40)]
        above: f64,
    },
    /// Mean of a numeric column per group, over rows matching a filter
    GroupAverage {
        #[arg(long, default_value = "theme")]
        group: String,
        #[arg(long, default_value = "intensity")]
        value: String,
        #[arg(long, default_value = "excitement_rating")]
        filter_column: String,
        #[arg(long, default_value = "High")]
        filter_value: String,
    },
    /// Build coaster records and show the first few
    Coasters {
        #[arg(short, long, default_value_t = 8)]
        limit: usize,
    },
    /// Sort rows by a numeric column and write them to a new file
    Sort {
        #[arg(long, default_value = "park_id")]
        column: String,
        #[arg(short, long, default_value = "rollercoasters_sorted_by_park_id.csv")]
        output: PathBuf,
    },
    /// Split rows into Low/Medium/High by a numeric column and write them out
    Bucket {
        #[arg(long, default_value = "avg_speed")]
        column: String,
        /// Values below this are Low
        #[arg(long)]
        low: Option<f64>,
        /// Values above this are High
        #[arg(long)]
        high: Option<f64>,
        #[arg(short, long, default_value = "rollercoasters_by_avg_speed.csv")]
        output: PathBuf,
    },
    /// Max, median, mean and mode of numeric columns
    Describe {
        #[arg(long, value_delimiter = ',', default_values = ["max_pos_gs", "max_neg_gs"])]
        columns: Vec<String>,
        #[arg(short, long, default_value = "gs_statistics.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/coaster_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("coaster_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    }
    .from_env()?;

    let input = cli.input.unwrap_or(settings.input.clone());
    let delimiter = cli.delimiter.unwrap_or(settings.delimiter);
    let source = Source::new(&input, delimiter);

    match cli.command {
        Commands::MostCommon { column } => {
            let value = most_common_value(source, &column)?;
            if cli.json {
                print_json(&value)?;
            } else {
                match value {
                    Some(v) => info!(column = %column, value = v, "Most common value"),
                    None => info!(column = %column, "No values"),
                }
            }
        }
        Commands::Distinct { column } => {
            let distinct = distinct_values(source, &column)?;
            if cli.json {
                print_json(&distinct)?;
            } else {
                info!(column = %column, count = distinct.count, "Distinct values");
                for value in &distinct.values {
                    info!(value = %value, "Distinct");
                }
            }
        }
        Commands::Filter {
            select,
            equals_column,
            equals_value,
            above_column,
            above,
        } => {
            let query = FilterQuery {
                select,
                predicates: vec![
                    Predicate::Equals {
                        column: equals_column,
                        value: equals_value,
                    },
                    Predicate::GreaterThan {
                        column: above_column,
                        threshold: above,
                    },
                ],
            };
            let matches = filter_values(source, &query)?;
            if cli.json {
                print_json(&matches)?;
            } else {
                info!(count = matches.len(), "Matching rows");
                for value in &matches {
                    info!(value = %value, "Match");
                }
            }
        }
        Commands::GroupAverage {
            group,
            value,
            filter_column,
            filter_value,
        } => {
            let query = GroupQuery {
                group_column: group,
                value_column: value,
                filter_column,
                filter_value,
            };
            let averages = group_average(source, &query)?;
            if cli.json {
                print_json(&averages)?;
            } else if averages.is_empty() {
                info!("No results");
            } else {
                for (key, mean) in &averages {
                    info!(group = %key, average = %format!("{:.2}", mean), "Group average");
                }
            }
        }
        Commands::Coasters { limit } => {
            let coasters = load_coasters(source)?;
            if cli.json {
                print_json(&coasters.iter().take(limit).collect::<Vec<_>>())?;
            } else {
                info!(built = coasters.len(), "Coaster records built");
                for coaster in coasters.iter().take(limit) {
                    info!("{}", coaster);
                }
            }
        }
        Commands::Sort { column, output } => {
            let written = sort_and_write(source, &output, &column)?;
            if cli.json {
                print_json(&written)?;
            } else {
                info!(rows = written, output = %output.display(), "Wrote sorted rows");
            }
        }
        Commands::Bucket {
            column,
            low,
            high,
            output,
        } => {
            let defaults = settings.thresholds();
            let spec = BucketSpec {
                value_column: column,
                thresholds: Thresholds {
                    low: low.unwrap_or(defaults.low),
                    high: high.unwrap_or(defaults.high),
                },
                ..BucketSpec::default()
            };
            let counts = bucket_and_write(source, &output, &spec)?;
            if cli.json {
                print_json(&counts)?;
            } else {
                info!(
                    total = counts.total(),
                    low = counts.low,
                    medium = counts.medium,
                    high = counts.high,
                    output = %output.display(),
                    "Wrote bucketed rows"
                );
            }
        }
        Commands::Describe { columns, output } => {
            let stats = describe_and_write(source, &output, &columns)?;
            if cli.json {
                print_json(&stats)?;
            } else {
                for column in &stats {
                    info!(column = %column.column, stats = ?column.stats, "Statistics");
                }
                info!(output = %output.display(), "Wrote statistics");
            }
        }
    }

    Ok(())
}
