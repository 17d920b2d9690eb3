use eyre::Result;
use rfslot_core::clock::SystemClock;
use rfslot_db::DataDir;
use serenity::{Client, prelude::GatewayIntents};
use std::sync::Arc;
use tracing::info;

pub mod components;
pub mod config;
pub mod format;
pub mod handlers;
pub mod publisher;
pub mod service;

/// Start the Discord bot with the provided configuration and storage.
///
/// Builds the [`service::SlotDesk`] over the JSON documents in `data_dir`
/// and runs the gateway client until it disconnects or fails.
///
/// # Arguments
///
/// * `config` - The bot configuration containing token, channel and zone
/// * `data_dir` - Directory holding the persisted documents
///
/// # Returns
///
/// * `Ok(())` if the bot shut down gracefully
/// * `Err` if an error occurred during initialization or operation
pub async fn start_bot(config: config::BotConfig, data_dir: DataDir) -> Result<()> {
    info!("Starting Discord bot (zone {})", config.timezone);

    let clock = Arc::new(SystemClock::new(config.timezone));
    let desk = Arc::new(service::SlotDesk::from_data_dir(&data_dir, clock));

    // Create a new Discord client
    let handler = handlers::Handler::new(config.clone(), desk);

    // Configure the client
    let mut client = Client::builder(&config.token, GatewayIntents::non_privileged())
        .event_handler(handler)
        .await?;

    // Start the client
    info!("Connecting to Discord...");
    client.start().await?;

    Ok(())
}
