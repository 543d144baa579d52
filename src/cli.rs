//! CLI argument parsing for perf-trends

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use perf_trends::Category;
use perf_trends::chart::DEFAULT_BAR_WIDTH;

/// Output format for frequency series
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Horizontal text bar chart (default)
    Text,
    /// JSON series for plotting elsewhere
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "perf-trends")]
#[command(version)]
#[command(
    about = "Yearly frequencies of genres, nationalities, works and composers in performance data",
    long_about = None
)]
pub struct Cli {
    /// Show progress bars for long-running steps
    #[arg(long, global = true)]
    pub progress: bool,

    /// Rows per record batch when reading files (overrides PARQUET_BATCH_SIZE)
    #[arg(long = "batch-size", value_name = "ROWS", global = true)]
    pub batch_size: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an event dataset from a raw CSV export and write it as Parquet
    Preprocess {
        /// Raw export with one row per (event, work)
        #[arg(long, value_name = "CSV")]
        events: PathBuf,

        /// Composer nationality table, one row per (composer, nationality)
        #[arg(long, value_name = "CSV")]
        nationalities: Option<PathBuf>,

        /// Parquet file to write
        #[arg(short, long, value_name = "PARQUET")]
        output: PathBuf,

        /// Field delimiter of both CSV files
        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// Composer column of the nationality table
        #[arg(long = "composer-column", default_value = "composer")]
        composer_column: String,

        /// Nationality column of the nationality table
        #[arg(long = "nationality-column", default_value = "nationality")]
        nationality_column: String,
    },

    /// Chart the yearly frequency of one selected value
    Chart {
        /// Parquet file or directory of Parquet shards
        #[arg(short, long, value_name = "PATH")]
        data: PathBuf,

        /// Genre, Nationality, Work or Composer
        #[arg(short, long, value_parser = parse_category)]
        category: Category,

        /// Selected value; Work and Composer take "<label> (#<id>)", Nationality accepts several
        #[arg(short, long = "value", required = true, num_args = 1..)]
        values: Vec<String>,

        /// First year of the range (inclusive); all dataset years when omitted
        #[arg(long, requires = "to")]
        from: Option<i32>,

        /// Last year of the range (inclusive)
        #[arg(long, requires = "from")]
        to: Option<i32>,

        /// Divide each count by the number of events in that year
        #[arg(short, long)]
        relative: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Width of the longest bar in text output, at most 1000
        #[arg(long, default_value_t = DEFAULT_BAR_WIDTH)]
        width: usize,
    },

    /// List the selectable values of a category
    Values {
        /// Parquet file or directory of Parquet shards
        #[arg(short, long, value_name = "PATH")]
        data: PathBuf,

        /// Genre, Nationality, Work or Composer
        #[arg(short, long, value_parser = parse_category)]
        category: Category,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::ALL
        .into_iter()
        .find(|category| category.name().eq_ignore_ascii_case(s))
        .ok_or_else(|| {
            format!("unknown category '{s}': expected Genre, Nationality, Work or Composer")
        })
}
