use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use landing_common::observability::init_logging;
use landing_config::{LandingConfig, LandingConfigLoader};
use landing_edge::{EventSource, HttpEventSource};
use landing_events::{EventRecord, ExtractorConfig, extract, load_events_block};
use landing_http::HttpClient;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upcoming-events scraper and edge endpoint.
#[derive(Parser)]
#[command(name = "landing", version)]
struct Cli {
    /// YAML config file (defaults to ./landing.yaml when present)
    #[arg(short, long, global = true, env = "LANDING_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the events endpoint
    Serve,

    /// Fetch the live events page once and print the records
    Scrape {
        /// Maximum number of records (1-6)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Extract events from a saved HTML file
    Parse {
        file: PathBuf,

        /// Maximum number of records (1-6)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Resolve the landing page's events block from the `landing` settings
    Feed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // File first, env overrides
    let loader = match &cli.config {
        Some(path) => LandingConfigLoader::new().with_file(path),
        None => LandingConfigLoader::new().with_optional_file("landing.yaml"),
    };
    let cfg: LandingConfig = loader.load().context("loading configuration")?;

    let log_file = init_logging(cfg.logging.to_log_config("landing"))?;
    tracing::debug!(log_file = %log_file.display(), version = ?cfg.version, "landing.start");

    match cli.command {
        Command::Serve => landing_edge::serve(&cfg).await,
        Command::Scrape { limit } => print_events(&scrape(&cfg, limit).await?),
        Command::Parse { file, limit } => parse(&cfg, &file, limit),
        Command::Feed => feed(&cfg).await,
    }
}

fn extractor(cfg: &LandingConfig, limit: Option<usize>) -> ExtractorConfig {
    ExtractorConfig::from_site(&cfg.site, limit.unwrap_or(cfg.extractor.limit))
}

/// A failed fetch still yields something usable: the placeholder events.
async fn scrape(cfg: &LandingConfig, limit: Option<usize>) -> Result<Vec<EventRecord>> {
    let source = HttpEventSource::from_site(&cfg.site)?;
    let extract_cfg = extractor(cfg, limit);
    let events = match source.fetch_html().await {
        Ok(html) => {
            let out = extract(&html, &extract_cfg);
            tracing::info!(count = out.events.len(), source = ?out.source, "landing.scrape.done");
            out.events
        }
        Err(e) => {
            tracing::warn!(error = %e, url = source.url(), "landing.scrape.fetch_failed");
            extract_cfg.placeholders()
        }
    };
    Ok(events)
}

fn parse(cfg: &LandingConfig, file: &Path, limit: Option<usize>) -> Result<()> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let out = extract(&html, &extractor(cfg, limit));
    tracing::info!(file = %file.display(), count = out.events.len(), source = ?out.source, "landing.parse.done");
    print_events(&out.events)
}

async fn feed(cfg: &LandingConfig) -> Result<()> {
    let client = HttpClient::new(cfg.site.origin())?
        .with_timeout(Duration::from_secs(cfg.site.timeout_secs))
        .with_retries(cfg.site.retries);
    let base = ExtractorConfig::from_site(&cfg.site, cfg.landing.events_limit);
    match load_events_block(&client, &cfg.landing, &base).await {
        Some(events) => print_events(&events),
        None => {
            println!("null");
            Ok(())
        }
    }
}

fn print_events(events: &[EventRecord]) -> Result<()> {
    let body = serde_json::to_string_pretty(&json!({ "events": events }))?;
    println!("{body}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_config::SiteConfig;

    fn unreachable_site() -> LandingConfig {
        LandingConfig {
            site: SiteConfig {
                origin: "http://127.0.0.1:1".into(),
                timeout_secs: 2,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn scrape_limit_flag_parses() {
        let cli = Cli::try_parse_from(["landing", "scrape", "-l", "1"]).unwrap();
        assert!(matches!(cli.command, Command::Scrape { limit: Some(1) }));
    }

    #[tokio::test]
    async fn failed_scrape_placeholders_respect_the_limit() {
        let cfg = unreachable_site();

        let one = scrape(&cfg, Some(1)).await.unwrap();
        assert_eq!(one.len(), 1);

        let default = scrape(&cfg, None).await.unwrap();
        assert_eq!(default.len(), 2);
        assert!(default.iter().all(|e| e.cta_label == "Register"));
    }
}
