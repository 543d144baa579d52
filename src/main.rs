mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use std::time::Instant;

use cli::{Cli, Command, OutputFormat};
use perf_trends::attribute::{Selection, resolve_category};
use perf_trends::chart::render_text;
use perf_trends::config::NationalityTableConfig;
use perf_trends::{
    Catalog, FrequencySeries, TrendsConfig, YearSelection, preprocess, read_dataset, write_dataset,
};

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = TrendsConfig::from_env();
    config.show_progress = cli.progress;
    if let Some(batch_size) = cli.batch_size {
        config.batch_size = batch_size.max(1);
    }

    match cli.command {
        Command::Preprocess {
            events,
            nationalities,
            output,
            delimiter,
            composer_column,
            nationality_column,
        } => {
            let Ok(delimiter) = u8::try_from(delimiter) else {
                bail!("Delimiter must be a single-byte character, got '{delimiter}'");
            };
            config.csv_delimiter = delimiter;
            config.nationality_table = NationalityTableConfig {
                composer_column,
                nationality_column,
            };

            let start = Instant::now();
            let dataset = preprocess::run(&events, nationalities.as_deref(), &config)
                .with_context(|| format!("Failed to preprocess {}", events.display()))?;
            write_dataset(&dataset, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(
                "Wrote {} events to {} in {:?}",
                dataset.len(),
                output.display(),
                start.elapsed()
            );
        }

        Command::Chart {
            data,
            category,
            values,
            from,
            to,
            relative,
            format,
            width,
        } => {
            let query = resolve_category(category, Selection::from(values))?;
            let dataset = read_dataset(&data, &config)
                .with_context(|| format!("Failed to load dataset from {}", data.display()))?;
            let years = YearSelection::from_bounds(from, to);
            let series = FrequencySeries::compute(&dataset, years, &query, relative)?;

            match format {
                OutputFormat::Text => print!("{}", render_text(&series, width)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&series)?),
            }
        }

        Command::Values { data, category } => {
            let dataset = read_dataset(&data, &config)
                .with_context(|| format!("Failed to load dataset from {}", data.display()))?;
            for value in Catalog::from_dataset(&dataset)?.values(category) {
                println!("{value}");
            }
        }
    }

    Ok(())
}
