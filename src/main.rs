use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sp500_ma::{cli::Cli, AverageService, Config, PriceRepository};

fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.app_env.default_log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let repository = PriceRepository::new(config.output_indent);
    let records = repository.load_prices(&cli.input)?;
    info!("Loaded {} monthly prices, anchor {}", records.len(), config.anchor);

    let results = AverageService::new().compute_averages(&records, config.anchor)?;

    repository
        .write_averages(&cli.output, &results)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    println!("Successfully processed {} months of data", results.len());
    println!("Output written to: {}", cli.output.display());

    Ok(())
}
