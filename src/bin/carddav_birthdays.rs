//! carddav-birthdays - fill birthdates from a CardDAV address book.
//!
//! Reads an `id;name;birthDate` table, looks every row's name up in the
//! address book and writes a table containing only the rows that received a
//! birthdate, ready for `immich-birthdays --update`.

use anyhow::{Context, Result};
use clap::Parser;
use immich_birthday_sync::observability::init_tracing;
use immich_birthday_sync::{table, CardDavClient, CardDavOverrides, Config, MatchService, Metrics};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "carddav-birthdays")]
#[command(about = "Fill birthdates from CardDAV server")]
struct Cli {
    /// Input table file (defaults to stdin)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output table file (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// CardDAV server URL
    #[arg(long)]
    url: Option<String>,

    /// CardDAV username
    #[arg(long)]
    username: Option<String>,

    /// CardDAV password
    #[arg(long)]
    password: Option<String>,

    /// Seconds to sleep between requests to avoid rate-limiting
    #[arg(long)]
    sleep: Option<f64>,

    /// Configuration file
    #[arg(long, default_value = immich_birthday_sync::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing("info");

    let config = Config::load(&cli.config).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    let overrides = CardDavOverrides {
        url: cli.url,
        username: cli.username,
        password: cli.password,
        sleep: cli.sleep,
    };
    let settings = config.carddav(&overrides)?;
    info!("Using address book at {} as {}", settings.url, settings.username);

    let rows = table::read_rows(open_input(cli.input.as_ref())?).context("Failed to read table")?;

    let metrics = Metrics::new();
    let client = CardDavClient::new(&settings, metrics.clone())?;
    let service = MatchService::new(client).with_delay(settings.sleep);

    let resources = service
        .list_contact_resources()
        .context("Failed to list address book")?;
    let report = service
        .match_and_normalize(rows, &resources)
        .context("Failed to fetch contact")?;

    table::write_rows(open_output(cli.output.as_ref())?, &report.matched)
        .context("Failed to write table")?;

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
