use clap::Parser;
use gripwax::catalog::{build_sources, load_all, merge};
use gripwax::config::{resolve_config, Overrides};
use gripwax::model::{Segment, SnowCondition};
use gripwax::report::format_selection;
use gripwax::{Selector, SelectorImpl};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gripwax", version, about = "Pick grip wax for today's temperature and snow")]
struct Cli {
    /// Air temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    temp: f64,

    /// dry, transformed or wet
    #[arg(long)]
    snow: SnowCondition,

    /// JSON config file (defaults to ./config.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra catalog (JSON file, .csv export or http(s) URL), may be repeated
    #[arg(long = "catalog")]
    catalogs: Vec<String>,

    /// Degrees added to both ends of each product window
    #[arg(long, allow_hyphen_values = true)]
    margin: Option<f64>,

    #[arg(long)]
    max_results: Option<usize>,

    /// race or training
    #[arg(long)]
    segment: Option<Segment>,

    /// Print the selection as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let overrides = Overrides {
        catalogs: cli.catalogs.clone(),
        margin_c: cli.margin,
        max_results: cli.max_results,
        segment: cli.segment,
    };
    let config = match resolve_config(cli.config.as_deref(), &overrides) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sources = match build_sources(
        &config.catalogs,
        Duration::from_secs(config.http_timeout_seconds),
    ) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to set up catalog sources: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Loading {} catalog sources...", sources.len());
    let products = match load_all(&sources).await {
        Ok(loaded) => merge(loaded),
        Err(e) => {
            error!("Catalog load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let selector = SelectorImpl::with_rules(config.scoring.clone());
    let selection = selector.select(cli.temp, cli.snow, &products, &config.selection);
    info!(
        "{} results, {} warnings from {} products",
        selection.results.len(),
        selection.warnings.len(),
        products.len()
    );

    if cli.json {
        match serde_json::to_string_pretty(&selection) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize selection: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", format_selection(&selection, cli.temp, cli.snow));
    }

    ExitCode::SUCCESS
}
