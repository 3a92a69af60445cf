//! Wiki-Trawl main entry point
//!
//! This is the command-line interface for the Wiki-Trawl article crawler.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use wiki_trawl::config::{load_config_with_hash, Config};
use wiki_trawl::crawler::run_crawl;
use wiki_trawl::extract::extract_saved_articles;
use wiki_trawl::output::{
    build_index, format_listing, load_saved_articles, load_statistics, mapping_path,
    print_report, print_statistics,
};
use wiki_trawl::{normalize_url, LinkClass, UrlClassifier};

/// Entries shown by `--list` before the remainder is summarised
const LIST_LIMIT: usize = 20;

/// Wiki-Trawl: a polite breadth-first wiki crawler
///
/// Wiki-Trawl walks one wiki section from a seed page, one request at a
/// time, and saves the HTML of pages whose URL marks them as articles.
#[derive(Parser, Debug)]
#[command(name = "wiki-trawl")]
#[command(version = "1.0.0")]
#[command(about = "A polite breadth-first wiki crawler", long_about = None)]
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

    /// Validate config and show how the seed is classified without crawling
    #[arg(long, conflicts_with_all = ["stats", "list", "build_index", "extract"])]
    dry_run: bool,

    /// Show statistics from the mapping log of the last run and exit
    #[arg(long, conflicts_with_all = ["dry_run", "list", "build_index", "extract"])]
    stats: bool,

    /// List saved articles from the mapping log and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats", "build_index", "extract"])]
    list: bool,

    /// Write index.html linking every saved article and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats", "list", "extract"])]
    build_index: bool,

    /// Extract article text into JSON and minimal HTML and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats", "list", "build_index"])]
    extract: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.list {
        handle_list(&config)?;
    } else if cli.build_index {
        handle_build_index(&config)?;
    } else if cli.extract {
        handle_extract(&config)?;
    } else {
        return handle_crawl(&config, config_hash).await;
    }

    Ok(ExitCode::SUCCESS)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_trawl=info,warn"),
            1 => EnvFilter::new("wiki_trawl=debug,info"),
            2 => EnvFilter::new("wiki_trawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated config and seed decision
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Wiki-Trawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Max articles: {}", config.crawler.max_articles);
    println!("  Delay between requests: {}s", config.crawler.delay_seconds);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_seconds
    );

    println!("\nScope:");
    println!("  Domain: {}", config.scope.domain);
    println!("  Path prefix: {}", config.scope.path_prefix);

    println!("\nArticle Filter:");
    println!("  Include suffix: {}", config.filter.include_suffix);
    if let Some(suffix) = &config.filter.exclude_suffix {
        println!("  Exclude suffix: {}", suffix);
    }
    for fragment in &config.filter.exclude_contains {
        println!("  Exclude containing: {}", fragment);
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Mapping log: {}", config.output.mapping_file);
    println!("  Run log: {}", config.output.log_file);

    let seed = normalize_url(&config.crawler.seed_url)?;
    let decision = match UrlClassifier::from_config(config).classify(&seed) {
        LinkClass::Article => "article (will be saved)",
        LinkClass::ExcludedArticle => "excluded article (traversed, not saved)",
        LinkClass::Page => "page (traversed, not saved)",
        LinkClass::OutOfScope => "out of scope",
    };

    println!("\n✓ Configuration is valid");
    println!("✓ Seed {} is classified as {}", seed, decision);

    Ok(())
}

/// Handles the --stats mode: summarises the mapping log of the last run
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let path = mapping_path(config);
    let records = load_saved_articles(config)
        .with_context(|| format!("Failed to read mapping log {}", path.display()))?;

    let stats = load_statistics(Path::new(&config.output.directory), &path, &records);
    print_statistics(&stats);

    Ok(())
}

/// Handles the --list mode: lists saved articles
fn handle_list(config: &Config) -> anyhow::Result<()> {
    let path = mapping_path(config);
    let records = load_saved_articles(config)
        .with_context(|| format!("Failed to read mapping log {}", path.display()))?;

    println!("Saved articles ({}):", records.len());
    for line in format_listing(&records, LIST_LIMIT) {
        println!("  {}", line);
    }

    Ok(())
}

/// Handles the --build-index mode: writes index.html into the output directory
fn handle_build_index(config: &Config) -> anyhow::Result<()> {
    let path = mapping_path(config);
    let records = load_saved_articles(config)
        .with_context(|| format!("Failed to read mapping log {}", path.display()))?;

    let index = build_index(Path::new(&config.output.directory), &records)
        .context("Failed to write index.html")?;

    println!("✓ Index of {} articles written to: {}", records.len(), index.display());

    Ok(())
}

/// Handles the --extract mode: writes JSON and minimal HTML per saved article
fn handle_extract(config: &Config) -> anyhow::Result<()> {
    let path = mapping_path(config);
    let records = load_saved_articles(config)
        .with_context(|| format!("Failed to read mapping log {}", path.display()))?;

    let (out_dir, summary) = extract_saved_articles(Path::new(&config.output.directory), &records)
        .context("Content extraction failed")?;

    println!("=== Content Extraction ===\n");
    println!("Output: {}", out_dir.display());
    println!("  Extracted: {}", summary.processed);
    if summary.skipped > 0 {
        println!("  Skipped (file missing or unreadable): {}", summary.skipped);
    }
    println!("  Original HTML: {:.2} KiB", summary.html_bytes as f64 / 1024.0);
    println!("  Extracted JSON: {:.2} KiB", summary.json_bytes as f64 / 1024.0);
    println!("  Size reduction: {:.2}%", summary.size_reduction());

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, config_hash: String) -> anyhow::Result<ExitCode> {
    let cancel = CancellationToken::new();

    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            signal_token.cancel();
        }
    });

    let report = run_crawl(config, Some(config_hash), &cancel)
        .await
        .context("Crawl could not be started")?;

    print_report(&report, config.crawler.max_articles);

    if report.is_success() {
        tracing::info!("Crawl finished: {}", report.stop_reason);
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!("Crawl failed: {}", report.stop_reason);
        Ok(ExitCode::FAILURE)
    }
}
