// src/main.rs

//! Crawler CLI entry point.

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;
use url::Url;

use crawler::error::{AppError, Result};
use crawler::models::{BackendConfig, CrawlConfig};
use crawler::pipeline::run_crawl;

#[derive(Parser, Debug)]
#[command(name = "crawler", version, about = "Bounded parallel web crawler")]
struct Cli {
    /// Enable verbose logging
    #[arg(long)]
    debug: bool,

    /// Seed URL to start crawling from
    #[arg(long, default_value = "https://google.com")]
    host: String,

    /// Max number of retries for each failed task
    #[arg(long, default_value_t = 3)]
    retries: usize,

    /// Max depth of the crawl tree (0 = unlimited)
    #[arg(long, default_value_t = 1)]
    depth: usize,

    /// Restrict the crawl to subdomains of the seed host
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    same_host: bool,

    /// Only crawl URLs whose host matches exactly
    #[arg(long, default_value = "")]
    filter_subdomain: String,

    /// Also crawl subdomains of the given host
    #[arg(long, default_value = "")]
    filter_host: String,

    /// Number of concurrent workers
    #[arg(long, default_value_t = 10)]
    parallelism: usize,

    /// Output format: json or raw
    #[arg(long, default_value = "json")]
    output: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "crawler=debug" } else { "crawler=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.host.is_empty() {
        return Err(AppError::config("a seed host is required"));
    }
    Url::parse(&cli.host)?;

    let config = CrawlConfig {
        seed: cli.host,
        parallelism: cli.parallelism,
        max_retry: cli.retries,
        max_depth: cli.depth,
        same_host: cli.same_host,
        exact_host: cli.filter_subdomain,
        subdomain: cli.filter_host,
        ..CrawlConfig::default()
    };

    let orchestrator = run_crawl(&config, &BackendConfig::default()).await?;

    match cli.output.as_str() {
        "raw" => println!("{:#?}", orchestrator.hits().await),
        _ => println!("{}", orchestrator.to_json().await?),
    }

    Ok(())
}
