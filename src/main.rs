//! tgrelay - Telegram to Discord webhook relay
//!
//! Long-polls a Telegram bot for messages, drops anything outside the
//! configured source chat or matching a block rule, and posts the rest
//! to a Discord webhook.

mod bridge;
mod common;
mod config;
mod discord;
mod telegram;

use anyhow::Result;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use bridge::{MessageFilter, RelayDispatcher, ScopeConfig};
use common::InboundEvent;
use config::{env::get_config_path, load_and_validate, TelegramConfig};
use discord::WebhookClient;
use telegram::TelegramPoller;

/// Events buffered between the poller and the relay.
const EVENT_QUEUE_CAPACITY: usize = 64;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("tgrelay v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {} (if present) and environment...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Set TG_BOT_TOKEN, or provide telegram.token in {}.", config_path);
        e
    })?;

    let filter = MessageFilter::with_defaults(config.extra_block_patterns())?;
    let scope = ScopeConfig::from_config(&config);

    info!("Configuration loaded successfully");
    info!("  Source chat: {}", scope.chat_id().unwrap_or("any"));
    info!("  Filter rules: {}", filter.len());

    let sink = match config.discord.webhook_url {
        Some(ref url) => {
            info!("  Webhook: configured");
            Some(WebhookClient::new(url)?)
        }
        None => {
            warn!("DISCORD_WEBHOOK_URL not set - messages will be logged but not forwarded");
            None
        }
    };

    let dispatcher = RelayDispatcher::new(filter, scope, sink);

    // ============================================================
    // Connect to Telegram
    // ============================================================
    let poller = TelegramPoller::new(&config.telegram)?;
    connect(&poller, &config.telegram).await.map_err(|e| {
        error!("Failed to connect to Telegram: {}", e);
        e
    })?;

    // ============================================================
    // Spawn poll and relay tasks
    // ============================================================
    let (events_tx, mut events_rx) = mpsc::channel::<InboundEvent>(EVENT_QUEUE_CAPACITY);

    let poll_task = tokio::spawn(async move {
        poller.run(events_tx).await;
    });

    let relay_task = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            dispatcher.handle(event).await;
        }
        info!("Relay task ended");
    });

    let shutdown = tokio::select! {
        biased;
        _ = shutdown_signal() => true,
        _ = poll_task => false,
        _ = relay_task => false,
    };

    if shutdown {
        info!("Shutdown signal received");
    } else {
        warn!("A worker task stopped unexpectedly");
    }

    info!("Exiting...");
    Ok(())
}

/// Verify the bot token and switch the bot to getUpdates mode.
async fn connect(poller: &TelegramPoller, config: &TelegramConfig) -> common::error::Result<()> {
    let me = poller.get_me().await?;
    info!(
        "Connected to Telegram as @{} (id {})",
        me.username.as_deref().unwrap_or(&me.first_name),
        me.id
    );

    poller.delete_webhook(config.drop_pending_updates).await?;
    if config.drop_pending_updates {
        info!("Dropped pending updates");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
