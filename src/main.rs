//! get-papers-list - PubMed non-academic author finder
//!
//! Searches PubMed, fetches article metadata and reports authors whose
//! affiliations look commercial.
//!
//! ## Usage
//!
//! ```bash
//! get-papers-list "crispr therapeutics" --file results.csv
//! get-papers-list "mrna vaccine" --debug
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use pubmed_papers::output::{print_records, save_to_csv};
use pubmed_papers::{pipeline, Config, PubmedClient};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Fetch PubMed papers with non-academic authors
#[derive(Parser)]
#[command(name = "get-papers-list")]
#[command(version, about, long_about = None)]
struct Cli {
    /// PubMed query string
    query: String,

    /// CSV file to save results (prints to the console when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Maximum number of papers to fetch
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Progress and result counts are only shown with `--debug`.
fn log_level(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.debug).to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(n) = cli.max_results {
        config.max_results = n;
    }

    let client = PubmedClient::new(config).context("Invalid configuration")?;

    let records = pipeline::fetch_and_process_papers(&client, &cli.query)
        .await
        .context("PubMed query failed")?;

    match cli.file {
        Some(path) => {
            let outcome = save_to_csv(&records, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", outcome.message(&path));
        }
        None => {
            let stdout = std::io::stdout();
            print_records(&mut stdout.lock(), &records).context("Failed to print records")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(true), Level::DEBUG);
        assert_eq!(log_level(false), Level::WARN);
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "get-papers-list",
            "cancer",
            "-f",
            "out.csv",
            "-d",
            "-n",
            "5",
        ]);
        assert_eq!(cli.query, "cancer");
        assert_eq!(cli.file, Some(PathBuf::from("out.csv")));
        assert!(cli.debug);
        assert_eq!(cli.max_results, Some(5));
        assert!(cli.config.is_none());
    }
}
