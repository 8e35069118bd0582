use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use proverbly::config::Config;
use proverbly::models::DigestSession;
use proverbly::notify::{ConsoleNotifier, Notifier, WebhookConfig, WebhookNotifier};
use proverbly::scheduler::{DigestScheduler, JobSet, RelayScheduler};
use proverbly::selector::NoRepeatSelector;
use proverbly::source::ContentFetcher;
use proverbly::storage::{seed_if_empty, ProverbRepository, SqliteProverbRepository};

#[derive(Parser)]
#[command(
    name = "proverbly",
    version,
    about = "Resilient quote and proverb agent with tiered sources and scheduled digests",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); environment variables are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent: seed the store and start the scheduled jobs
    Serve,

    /// Fetch a single quote through the tier cascade
    Quote,

    /// Select a random proverb from the store without repeats
    Proverb {
        /// Restrict to a language
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Fire one digest session immediately
    Digest {
        /// Session name (morning, afternoon, evening)
        #[arg(short, long)]
        session: String,
    },

    /// Bulk-load a JSON seed file into an empty store
    Seed {
        /// Seed file path
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            tracing::info!("Starting serve command");
            serve(config).await?;
        }

        Commands::Quote => {
            quote(config).await?;
        }

        Commands::Proverb { language } => {
            tracing::info!(language = ?language, "Starting proverb command");
            proverb(config, language).await?;
        }

        Commands::Digest { session } => {
            tracing::info!(session = %session, "Starting digest command");
            digest_once(config, &session).await?;
        }

        Commands::Seed { file } => {
            tracing::info!(file = %file.display(), "Starting seed command");
            seed(config, &file).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("proverbly=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("proverbly=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

fn open_repository(config: &Config) -> Result<Arc<dyn ProverbRepository>> {
    Ok(Arc::new(SqliteProverbRepository::new(
        &config.database.sqlite_path,
    )?))
}

fn build_notifier(config: &Config) -> Result<Arc<dyn Notifier>> {
    match &config.notify.webhook_url {
        Some(url) => {
            let webhook = WebhookNotifier::new(
                WebhookConfig::new(url).with_timeout(config.notify.timeout_secs),
            )?;
            Ok(Arc::new(webhook))
        }
        None => Ok(Arc::new(ConsoleNotifier::new())),
    }
}

/// Run the long-lived agent
async fn serve(config: Config) -> Result<()> {
    let repository = open_repository(&config)?;

    if let Some(seed_path) = &config.database.seed_path {
        match seed_if_empty(repository.as_ref(), seed_path).await {
            Ok(count) if count > 0 => tracing::info!(count, "store seeded at startup"),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "startup seeding failed, continuing"),
        }
    }

    let notifier = build_notifier(&config)?;

    // The relay job saves fetched quotes itself with its provenance tag, so
    // its fetcher carries no repository (a fetcher-attached repository would
    // record every remote fetch a second time).
    let fetcher = Arc::new(ContentFetcher::connect(&config.sources, None).await?);
    tracing::info!(tier = %fetcher.preferred_tier(), "preferred tier resolved");

    let relay = if config.relay.enabled {
        Some(Arc::new(RelayScheduler::new(
            Arc::clone(&fetcher),
            Arc::clone(&repository),
            config.relay_interval(),
        )))
    } else {
        None
    };

    let digest = if config.digest.enabled {
        Some(Arc::new(DigestScheduler::new(
            Arc::clone(&repository),
            Arc::new(NoRepeatSelector::new()),
            notifier,
            &config.digest,
        )?))
    } else {
        None
    };

    let jobs = JobSet::spawn(relay, digest);
    tracing::info!(jobs = jobs.len(), "agent running, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    jobs.shutdown();

    Ok(())
}

/// Fetch one quote through the cascade and print it
async fn quote(config: Config) -> Result<()> {
    let repository = open_repository(&config)?;
    let fetcher = ContentFetcher::connect(&config.sources, Some(repository)).await?;

    let quote = fetcher.fetch().await;
    println!("{quote}");
    Ok(())
}

/// Select a proverb from the store without repeats and print it
async fn proverb(config: Config, language: Option<String>) -> Result<()> {
    let repository = open_repository(&config)?;

    let (key, pool) = match &language {
        Some(language) => (
            language.to_uppercase(),
            repository.find_by_language(language)?,
        ),
        None => ("ALL".to_string(), repository.find_all()?),
    };

    if pool.is_empty() {
        match language {
            Some(language) => anyhow::bail!("No proverb found for language: {language}"),
            None => anyhow::bail!("No proverbs available yet! Please add some first."),
        }
    }

    let selector = NoRepeatSelector::new();
    let item = selector.select(&key, &pool)?;

    println!("[{}] {}", item.language, item.text);
    if let Some(translation) = &item.translation {
        println!("  Translation: {translation}");
    }
    if let Some(meaning) = &item.meaning {
        println!("  Meaning: {meaning}");
    }
    Ok(())
}

/// Fire one digest session immediately
async fn digest_once(config: Config, session: &str) -> Result<()> {
    let session = DigestSession::parse(session)
        .ok_or_else(|| anyhow::anyhow!("invalid session '{session}' (morning, afternoon, evening)"))?;

    let repository = open_repository(&config)?;
    let notifier = build_notifier(&config)?;
    let digest = DigestScheduler::new(
        repository,
        Arc::new(NoRepeatSelector::new()),
        notifier,
        &config.digest,
    )?;

    digest.send_digest(session).await;
    Ok(())
}

/// Bulk-load a seed file into an empty store
async fn seed(config: Config, file: &Path) -> Result<()> {
    let repository = open_repository(&config)?;
    let count = seed_if_empty(repository.as_ref(), file).await?;

    if count > 0 {
        println!("Store seeded with {count} proverbs.");
    } else {
        println!("Store already contains data. Skipping seeding.");
    }
    Ok(())
}
