//! jobwatch CLI
//!
//! Local execution entry point: single checks, seen-set initialization,
//! and the continuous watch loop.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use jobwatch::{
    error::Result,
    models::Config,
    notify::{self, EmailNotifier},
    pipeline,
    storage::{FileSeenStore, SeenStore},
};

/// jobwatch - Career Site Posting Monitor
#[derive(Parser, Debug)]
#[command(
    name = "jobwatch",
    version,
    about = "Monitors corporate career sites for new software engineering postings"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check all sites once and notify on new postings
    Check {
        /// Print new postings as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Record all current postings as seen, without notifying
    Init,

    /// Check repeatedly at the configured interval
    Watch,

    /// Validate the configuration file
    Validate,

    /// Show seen-set and configuration summary
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn source_names(config: &Config) -> HashMap<String, String> {
    config
        .sites
        .iter()
        .map(|site| (site.id.clone(), site.name.clone()))
        .collect()
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    let store = FileSeenStore::new(&config.monitor.seen_file);

    match cli.command {
        Command::Check { json } => {
            config.validate()?;
            let notifier = EmailNotifier::from_env(config.email.clone(), &config.sites);

            let outcome = pipeline::run_once(&config, &store, &notifier).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.new_postings)?);
            } else if !outcome.new_postings.is_empty() {
                print!(
                    "{}",
                    notify::text_body(&outcome.new_postings, &source_names(&config))
                );
            }
        }

        Command::Init => {
            config.validate()?;
            let outcome = pipeline::run_init_once(&config, &store).await?;
            log::info!(
                "Recorded {} postings; monitoring is armed without alerts",
                outcome.recorded
            );
        }

        Command::Watch => {
            config.validate()?;
            let notifier = EmailNotifier::from_env(config.email.clone(), &config.sites);
            let interval = Duration::from_secs(config.monitor.check_interval_secs);

            log::info!(
                "Watching {} site(s) every {}s",
                config.sites.len(),
                config.monitor.check_interval_secs
            );

            loop {
                // Per-iteration errors are logged, never fatal.
                match pipeline::run_once(&config, &store, &notifier).await {
                    Ok(outcome) => log::info!(
                        "Checked {} postings, {} new, {} site(s) failed",
                        outcome.postings.len(),
                        outcome.new_postings.len(),
                        outcome.sites_failed
                    ),
                    Err(e) => log::error!("Check failed: {e}"),
                }

                let next = chrono::Local::now()
                    + chrono::Duration::seconds(config.monitor.check_interval_secs as i64);
                log::info!(
                    "Next check scheduled at {}",
                    next.format("%Y-%m-%d %H:%M:%S")
                );
                tokio::time::sleep(interval).await;
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK ({} sites, {} global exclude tokens)",
                config.sites.len(),
                config.excluded_title_tokens.len()
            );
        }

        Command::Info => {
            log::info!("Config file: {}", cli.config.display());
            log::info!("Seen file: {}", store.path().display());

            let seen = store.load().await?;
            log::info!("Previously seen postings: {}", seen.len());

            for site in &config.sites {
                log::info!("  {} ({}) -> {}", site.id, site.name, site.search_url);
            }
        }
    }

    Ok(())
}
