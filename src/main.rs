//! Buildgram - CI/CD notification harness
//!
//! A thin host binary around the notification pipeline: loads configuration,
//! reads one notification event as JSON, composes the message, and dispatches
//! it to Telegram. Delivery is best-effort; the process exits successfully
//! regardless of the dispatch outcome.

use anyhow::{Context, Result};
use buildgram::{
    cli::Cli,
    compose::MessageComposer,
    config::Config,
    core::{DeliveryTarget, NotificationEvent},
    notification::{notifier::Notifier, telegram::TelegramClient},
};
use clap::Parser;
use std::io::Read;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Manually initialize a subscriber for this specific error
        tracing_subscriber::fmt().init();
        error!("Failed to load configuration: {}", err);
        // Exit if configuration fails, as it's a critical step.
        std::process::exit(1);
    });

    // Initialize logging; the library's per-dispatch outcome records are
    // emitted through `tracing`, so the binary must install a subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Buildgram starting up...");
    info!("Chat ID: {}", config.telegram.chat_id);
    info!("API Base: {}", config.telegram.api_base);

    let event = read_event(&cli).context("failed to read notification event")?;

    let target = DeliveryTarget {
        bot_token: config.telegram.bot_token,
        chat_id: config.telegram.chat_id,
    };

    let transport = Arc::new(TelegramClient::with_api_base(config.telegram.api_base));
    let notifier = Notifier::new(MessageComposer::default(), transport);

    // The dispatch outcome is already logged by the transport; a failed
    // delivery never fails the invoking pipeline.
    match notifier.notify(&target, &event).await {
        None => info!("Nothing to send: event carried an empty base message"),
        Some(Ok(_)) => info!("Notification delivered"),
        Some(Err(e)) => error!("Notification not delivered: {}", e),
    }

    Ok(())
}

/// Reads the notification event from the file given on the command line, or
/// from stdin when no file was given.
fn read_event(cli: &Cli) -> Result<NotificationEvent> {
    let raw = match &cli.event {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("could not read event file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("could not read event from stdin")?;
            buffer
        }
    };
    serde_json::from_str(&raw).context("event is not valid notification JSON")
}
