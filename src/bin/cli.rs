//! yasku CLI
//!
//! Local execution entry point. Polls PubMed for the configured topics and
//! forwards new articles to the configured Discord webhook.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use yasku::{
    error::Result,
    models::Config,
    pipeline,
    services::{DiscordNotifier, PubmedClient},
    storage::CacheStore,
};

/// yasku - keep up to date with science fields via PubMed and Discord
#[derive(Parser, Debug)]
#[command(
    name = "yasku",
    version,
    about = "Keep up to date with science fields via PubMed and Discord"
)]
struct Cli {
    /// Path to the config file (default: ~/.yasku)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll all configured topics once and notify new articles
    Run,

    /// Validate the configuration file
    Validate,

    /// Show cache location and per-topic seen-article counts
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let config = Config::load_or_init(&config_path)?;

    match cli.command {
        Command::Run => {
            config.validate()?;

            let store = CacheStore::new(config.cache_dir()?);
            store.init(&config.topics).await?;

            let pubmed = PubmedClient::new(&config)?;
            let notifier = DiscordNotifier::new(&config)?;
            pipeline::run_poll(&config, &store, &pubmed, &notifier).await?;
        }

        Command::Validate => {
            config.validate()?;
            log::info!("Configuration at {} is valid", config_path.display());
        }

        Command::Info => {
            let cache_dir = config.cache_dir()?;
            let store = CacheStore::new(&cache_dir);
            let state = store.load_state(&config.topics).await?;

            println!("Config file: {}", config_path.display());
            println!("Cache folder: {}", cache_dir.display());
            println!(
                "Webhook configured: {}",
                if config.webhook_configured() { "yes" } else { "no" }
            );
            println!("Topics ({}):", config.topics.len());
            for topic in &config.topics {
                println!("  {}: {} seen articles", topic, state.topic_count(topic));
            }
        }
    }

    Ok(())
}
