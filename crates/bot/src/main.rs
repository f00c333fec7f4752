mod telegram;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use offlinebot_core::{
    load_config, validate_config, AuthCache, Notifier, Pipeline, RefreshTrigger, Refresher,
    Resolver, SanitizedConfig, SearchResolver, Submitter, TaskSubmitter,
};

use telegram::TelegramNotifier;

/// Environment variable holding the config file path.
const CONFIG_PATH_ENV: &str = "OFFLINEBOT_CONFIG";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    let sanitized = SanitizedConfig::from(&config);
    info!(
        "Configuration loaded: {}",
        serde_json::to_string(&sanitized).unwrap_or_default()
    );

    let auth = Arc::new(AuthCache::new(&config).context("Failed to create backend client")?);
    let resolver: Arc<dyn Resolver> =
        Arc::new(SearchResolver::new(&config).context("Failed to create search client")?);
    let submitter: Arc<dyn Submitter> = Arc::new(
        TaskSubmitter::new(&config, Arc::clone(&auth))
            .context("Failed to create submission client")?,
    );
    let refresher: Arc<dyn Refresher> = Arc::new(
        RefreshTrigger::new(&config, Arc::clone(&auth))
            .context("Failed to create refresh client")?,
    );

    let bot = Bot::new(&config.telegram_token);
    let me = bot.get_me().await.context("Failed to reach Telegram")?;
    info!("Logged in as @{}", me.username());

    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(bot.clone()));
    let pipeline = Arc::new(Pipeline::new(resolver, submitter, refresher, notifier));

    let handler = Update::filter_message().endpoint(telegram::handle_message);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![pipeline])
        .enable_ctrlc_handler()
        .build();

    let shutdown_token = dispatcher.shutdown_token();
    tokio::spawn(async move {
        terminate_signal().await;
        info!("SIGTERM received, shutting down");
        match shutdown_token.shutdown() {
            Ok(done) => done.await,
            Err(_) => warn!("Dispatcher was not running"),
        }
    });

    info!("Bot service started");
    dispatcher.dispatch().await;
    info!("Bot service stopped");

    Ok(())
}

/// Wait for SIGTERM. Ctrl+C is handled by the dispatcher itself.
#[cfg(unix)]
async fn terminate_signal() {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
        Ok(mut signal) => {
            signal.recv().await;
        }
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate_signal() {
    std::future::pending::<()>().await;
}
