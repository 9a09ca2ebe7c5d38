//! Operator CLI for content-intake.
//!
//! Runs the analysis pipeline and its parts locally, against the same
//! configuration the server uses, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Full analysis, printed as JSON
//! cargo run --bin intake-cli -- analyze "Hello, see bit.ly/x or call +1 650 253 0000"
//!
//! # Follow a redirect chain
//! cargo run --bin intake-cli -- resolve https://bit.ly/x
//!
//! # Language guess only
//! cargo run --bin intake-cli -- detect "Bonjour tout le monde"
//!
//! # Cache connectivity
//! cargo run --bin intake-cli -- cache ping
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `content_intake::config`. Without cache variables
//! every command runs uncached.

use content_intake::application::services::{LanguageResolver, RedirectResolver};
use content_intake::config::{self, Config};
use content_intake::domain::entities::AnalysisRequest;
use content_intake::infrastructure::cache::{CacheService, RedisCache};
use content_intake::infrastructure::detection::LinguaDetector;
use content_intake::infrastructure::http::ReqwestProbe;
use content_intake::server::{build_analysis_service, build_cache};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// CLI tool for content-intake.
#[derive(Parser)]
#[command(name = "intake-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// How long to wait for the cache to connect, in milliseconds
    #[arg(long, default_value_t = 2000)]
    cache_wait_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Analyze a message and print the result as JSON
    Analyze {
        /// Message content
        text: String,
    },

    /// Follow the redirect chain of a URL
    Resolve {
        /// URL to resolve (scheme optional)
        url: String,
    },

    /// Detect the language of a text
    Detect {
        /// Text to classify
        text: String,
    },

    /// Cache operations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Cache subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Check cache connectivity
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;
    let wait = Duration::from_millis(cli.cache_wait_ms);

    match cli.command {
        Commands::Analyze { text } => handle_analyze(&config, wait, text).await?,
        Commands::Resolve { url } => handle_resolve(&config, wait, &url).await?,
        Commands::Detect { text } => handle_detect(&text),
        Commands::Cache { action } => match action {
            CacheAction::Ping => handle_cache_ping(&config, wait).await,
        },
    }

    Ok(())
}

/// Runs the full pipeline once.
async fn handle_analyze(config: &Config, wait: Duration, text: String) -> Result<()> {
    let cache = build_cache(config, wait).await;
    let service = build_analysis_service(config, cache)?;

    let result = service.analyze(&AnalysisRequest::new(text)).await;

    let source = if result.cached { "cache" } else { "computed" };
    eprintln!(
        "{} {} in {} ms",
        "🔎 Analysis".bright_blue().bold(),
        source.cyan(),
        result.processing_time_ms
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Resolves a single URL through the redirect engine.
async fn handle_resolve(config: &Config, wait: Duration, url: &str) -> Result<()> {
    let cache = build_cache(config, wait).await;
    let probe = ReqwestProbe::new(config.redirect_timeout(), &config.probe_user_agent)
        .context("Failed to build redirect probe")?;
    let resolver = RedirectResolver::new(Arc::new(probe), cache)
        .with_max_hops(config.redirect_max_hops)
        .with_ttl(config.redirect_cache_ttl_seconds);

    let outcome = resolver.resolve_redirects(url).await;

    println!("{}", "🔗 Redirect chain".bright_blue().bold());
    println!();
    println!("  Start: {}", url.cyan());
    println!("  Final: {}", outcome.final_url.bright_yellow().bold());
    println!("  Hops:  {}", outcome.redirect_count);
    if outcome.redirect_count >= config.redirect_max_hops {
        println!();
        println!("{}", "⚠️  Hop limit reached, the chain may continue".yellow());
    }
    Ok(())
}

/// Prints the language guess for a text.
fn handle_detect(text: &str) {
    let resolver = LanguageResolver::new(Arc::new(LinguaDetector::new()));
    let guess = resolver.detect(text);

    if guess.is_unknown() {
        println!("{}", "❓ Language could not be determined".yellow());
    } else {
        println!(
            "{} {} ({}%)",
            "🌐 Language:".bright_white().bold(),
            guess.language.bright_yellow().bold(),
            guess.confidence
        );
    }
}

/// Reports cache connectivity.
async fn handle_cache_ping(config: &Config, wait: Duration) {
    println!("{}", "🗄️  Cache".bright_blue().bold());
    println!();

    let Some(settings) = config.redis_settings() else {
        println!("{}", "  Caching is disabled (no REDIS_* configuration)".yellow());
        return;
    };

    println!("  Topology: {}", settings.topology.to_string().cyan());
    let cache = RedisCache::start(settings);
    let connected = cache.wait_ready(wait).await && cache.is_healthy().await;

    if connected {
        println!("  State:    {}", "ready".green().bold());
        println!();
        println!("{}", "✅ Cache reachable".green().bold());
    } else {
        println!("  State:    {}", cache.state().as_str().red().bold());
        println!();
        println!("{}", "❌ Cache unreachable".red().bold());
    }
}
