//! immich-birthdays - list people without birthdates, or push birthdates back.
//!
//! `--fetch` writes an `id;name;birthDate` table of named people whose
//! birthdate is empty. `--update` reads such a table (edited by hand or
//! produced by `carddav-birthdays`) and sets each filled-in birthdate.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use immich_birthday_sync::observability::init_tracing;
use immich_birthday_sync::{table, Config, DirectoryService, ImmichClient, Metrics, TableRow};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "immich-birthdays")]
#[command(about = "Immich people birthdate management")]
#[command(group(ArgGroup::new("mode").required(true).args(["fetch", "update"])))]
struct Cli {
    /// Fetch people without birthdates and output a table
    #[arg(long)]
    fetch: bool,

    /// Update people birthdates from a table
    #[arg(long)]
    update: bool,

    /// No non-error output
    #[arg(long)]
    silent: bool,

    /// Table file to read from or write to (default: stdin/stdout)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = immich_birthday_sync::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.silent { "warn" } else { "info" });

    let config = Config::load(&cli.config).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    let settings = config.immich()?;
    info!("Using Immich at {}", settings.url);

    let metrics = Metrics::new();
    let service = DirectoryService::new(ImmichClient::new(&settings, metrics.clone()));

    if cli.fetch {
        let people = service
            .fetch_missing_birthdates()
            .context("Failed to list people")?;
        let rows: Vec<TableRow> = people.iter().map(TableRow::placeholder).collect();
        table::write_rows(open_output(cli.file.as_ref())?, &rows)
            .context("Failed to write table")?;
    } else {
        let rows = table::read_rows(open_input(cli.file.as_ref())?)
            .context("Failed to read table")?;
        service.apply_birthdate_updates(&rows, cli.silent);
    }

    metrics.log_summary();
    Ok(())
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn Read>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Cannot open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    })
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}
