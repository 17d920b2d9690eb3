use color_eyre::eyre::Result;
use dotenv::dotenv;
use rfslot_db::open_data_dir;
use rfslot_discord_bot::config::BotConfig;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = BotConfig::from_env()?;

    // Initialize logging; RUST_LOG overrides LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str().to_lowercase()));
    fmt().with_env_filter(filter).init();

    info!(
        "Starting RF slot bot (zone {}, data in {})",
        config.timezone,
        config.data_dir.display()
    );

    let data_dir = open_data_dir(&config.data_dir).await?;

    match rfslot_discord_bot::start_bot(config, data_dir).await {
        Ok(_) => info!("Discord bot shut down gracefully"),
        Err(e) => error!("Discord bot error: {}", e),
    }

    Ok(())
}
