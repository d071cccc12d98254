//! Ripple-Count main entry point
//!
//! This is the command-line interface for the Ripple-Count word crawler.

use anyhow::Context;
use clap::Parser;
use ripple_count::config::{load_config_with_hash, Config};
use ripple_count::crawler::CrawlEngine;
use ripple_count::fetcher::{build_http_client, HttpPageFetcher};
use ripple_count::output::{write_result, write_result_to};
use ripple_count::profiler::{Profiled, Profiler};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Ripple-Count: a concurrent word-frequency crawler
///
/// Ripple-Count crawls outward from the configured start pages, following
/// links up to a maximum depth within a time budget, and reports the most
/// popular words found along with the number of pages visited.
#[derive(Parser, Debug)]
#[command(name = "ripple-count")]
#[command(version)]
#[command(about = "A concurrent word-frequency crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_count=info,warn"),
            1 => EnvFilter::new("ripple_count=debug,info"),
            2 => EnvFilter::new("ripple_count=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout stays clean for the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved settings
fn handle_dry_run(config: &Config) {
    let settings = config.crawler_settings();

    println!("=== Ripple-Count Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", settings.max_depth);
    println!("  Timeout: {}s", settings.timeout.as_secs());
    println!("  Popular word count: {}", settings.popular_word_count);
    println!(
        "  Parallelism: {} requested, {} available",
        settings.parallelism,
        ripple_count::crawler::max_parallelism()
    );

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    match config.output.result_path() {
        Some(path) => println!("  Result: {}", path.display()),
        None => println!("  Result: stdout"),
    }
    match config.output.profile_output_path() {
        Some(path) => println!("  Profile: {}", path.display()),
        None => println!("  Profile: stdout"),
    }

    println!("\nStart Pages ({}):", config.crawler.start_pages.len());
    for page in &config.crawler.start_pages {
        println!("  - {}", page);
    }

    println!("\nIgnored URLs ({}):", settings.ignored_urls.len());
    for pattern in &settings.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored Words ({}):", config.crawler.ignored_words.len());
    for pattern in &config.crawler.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> ripple_count::Result<()> {
    let profiler = Profiler::new();

    let client = build_http_client(&config.user_agent)?;
    let fetcher = Profiled::new(
        HttpPageFetcher::new(client, config.ignored_word_patterns()?),
        profiler.clone(),
    );

    let (failures_tx, mut failures_rx) = mpsc::unbounded_channel();
    let engine = CrawlEngine::new(fetcher, config.crawler_settings())?
        .with_failure_reporter(failures_tx);

    tracing::info!(
        "Total start pages: {}, parallelism: {} (max {})",
        config.crawler.start_pages.len(),
        engine.parallelism(),
        engine.max_parallelism()
    );

    let result = profiler
        .profile("CrawlEngine#crawl", engine.crawl(&config.crawler.start_pages))
        .await;

    // The engine still holds the sender, so drain without waiting
    let mut failed = 0usize;
    while failures_rx.try_recv().is_ok() {
        failed += 1;
    }
    if failed > 0 {
        tracing::warn!("{} page(s) could not be fetched", failed);
    }

    match config.output.result_path() {
        Some(path) => {
            write_result(&result, path)?;
            tracing::info!("Result written to {}", path.display());
        }
        None => write_result_to(&result, &mut std::io::stdout().lock())?,
    }

    match config.output.profile_output_path() {
        Some(path) => {
            profiler.write_data(path)?;
            tracing::info!("Profile data written to {}", path.display());
        }
        None => profiler.write_data_to(&mut std::io::stdout().lock())?,
    }

    tracing::info!(
        "Crawl completed: {} pages visited, {} popular words",
        result.urls_visited(),
        result.word_counts().len()
    );

    Ok(())
}
