//! Command-line entry point.
//!
//! # Usage
//!
//! ```bash
//! # Full run, input read from INPUT.json in the key-value store
//! job-aggregator run
//!
//! # Full run with an explicit input file and storage root
//! job-aggregator run --input input.json --storage-dir ./out
//!
//! # Print the request plan only
//! job-aggregator plan --input input.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use job_aggregator::application::services::RunReport;
use job_aggregator::config::{Config, load_from_env};
use job_aggregator::runner;

/// Job listing aggregator.
#[derive(Parser)]
#[command(name = "job-aggregator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, filter, deduplicate and store jobs
    Run {
        /// JSON run input (defaults to INPUT.json in the key-value store)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Storage root, overrides STORAGE_DIR
        #[arg(short, long)]
        storage_dir: Option<PathBuf>,
    },

    /// Print the normalized keyword and the request plan
    Plan {
        /// JSON run input (defaults to INPUT.json in the key-value store)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = load_from_env().context("Invalid configuration")?;
    init_tracing(&config);

    match cli.command {
        Commands::Run { input, storage_dir } => {
            if let Some(dir) = storage_dir {
                config.storage_dir = dir;
            }
            config.print_summary();

            let store = runner::key_value_store(&config);
            let search = runner::load_input(&store, input.as_deref())
                .await
                .context("Failed to load run input")?;

            let report = runner::run(&config, &search)
                .await
                .context("Job search run failed")?;
            print_report(&report);
        }
        Commands::Plan { input } => {
            let store = runner::key_value_store(&config);
            let search = runner::load_input(&store, input.as_deref())
                .await
                .context("Failed to load run input")?;

            let (keyword, requests) = runner::plan(&config, &search);
            println!("{} {}", "Keyword:".bright_white().bold(), keyword.cyan());
            println!("{} {}", "Requests:".bright_white().bold(), requests.len());
            for request in &requests {
                println!("  {}", request.label());
            }
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_report(report: &RunReport) {
    let elapsed = report.finished_at - report.started_at;

    println!();
    println!("{}", "Job search finished".green().bold());
    println!("  Keyword:   {}", report.keyword.cyan());
    println!(
        "  Requests:  {} ({} retried)",
        report.search.requests, report.search.retried_requests
    );
    println!("  Fetched:   {}", report.search.fetched);
    println!("  Filtered:  {}", report.search.filtered);
    println!("  Saved:     {}", report.saved().to_string().bright_yellow().bold());

    for (source, stats) in &report.search.per_source {
        println!(
            "    {:<14} {} fetched, {} kept",
            source.bright_cyan(),
            stats.fetched,
            stats.kept
        );
    }

    println!("  Dataset:   {} records", report.export.dataset_records);
    println!("  CSV:       {} bytes", report.export.csv_bytes);
    println!(
        "  Notified:  {}",
        if report.export.notification_sent {
            "yes".green()
        } else {
            "no".dimmed()
        }
    );
    println!("  Duration:  {}ms", elapsed.num_milliseconds());
}
