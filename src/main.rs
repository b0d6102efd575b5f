use anyhow::{Context, Result};
use clap::Parser;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

use broadsheet_extract::broadsheet::{self, BroadsheetsData};
use broadsheet_extract::utils::parse_column;
use broadsheet_extract::config::MAX_COLUMN;
use broadsheet_extract::{logging, ScanConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Broadsheet workbook path (xlsx, xlsm, xlsb, xls or ods)
    #[arg(required = true)]
    file_path: PathBuf,

    /// TOML file overriding the header scan layout
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Last column of the header scan, as a number or letters (e.g. 300 or KN)
    #[arg(long, value_parser = parse_column)]
    last_column: Option<usize>,

    /// Print only each term's inferred schema
    #[arg(long, short = 's')]
    schema_only: bool,

    /// Print only the given term
    #[arg(long, short = 't')]
    term: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => ScanConfig::from_file(path)
            .with_context(|| format!("Unable to load config: {}", path.display()))?,
        None => ScanConfig::from_env(),
    };
    if let Some(last_column) = cli.last_column {
        if last_column < config.first_column {
            anyhow::bail!(
                "Last column {} precedes the first scanned column {}",
                last_column,
                config.first_column
            );
        }
        if last_column > MAX_COLUMN {
            anyhow::bail!(
                "Last column {} is beyond the last worksheet column {}",
                last_column,
                MAX_COLUMN
            );
        }
        config.last_column = last_column;
    }

    let mut data: BroadsheetsData =
        broadsheet::extract_broadsheets_data_with_config(&cli.file_path, &config)
            .with_context(|| format!("Unable to extract broadsheets: {}", cli.file_path.display()))?;

    if let Some(term) = &cli.term {
        let key = broadsheet_extract::utils::title_case(term.trim());
        let Some(entry) = data.shift_remove(&key) else {
            anyhow::bail!("Term not found in workbook: {}", key);
        };
        data = IndexMap::from([(key, entry)]);
    }

    let json_string = if cli.schema_only {
        let schemas: IndexMap<&String, _> = data
            .iter()
            .map(|(term, sheet)| (term, &sheet.broadsheet_schema))
            .collect();
        serialize_to_json(&schemas)?
    } else {
        serialize_to_json(&data)?
    };
    println!("{}", json_string);

    Ok(())
}
