//! # Bot Configuration Module
//!
//! Loads the bot's settings from environment variables.
//!
//! ## Environment Variables
//!
//! - `DISCORD_TOKEN`: Discord bot token (required)
//! - `RF_DATA_DIR`: Directory holding the JSON documents (default: ".")
//! - `RF_STATUS_CHANNEL`: Name of the status channel (default: "📊┃rf-slot")
//! - `RF_STATUS_CHANNEL_ID`: Explicit status channel id, wins over the name
//! - `RF_TIMEZONE`: IANA zone used for every date and time (default: "Asia/Jakarta")
//! - `LOG_LEVEL`: Logging level (default: "info")

use chrono_tz::Tz;
use eyre::{Result, eyre};
use std::env;
use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_STATUS_CHANNEL: &str = "📊┃rf-slot";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Jakarta;

/// Configuration for the Discord bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord bot token (required)
    pub token: String,
    /// Where `rf_list.json`, `rf_slots.json` and `monitor_message.json` live
    pub data_dir: PathBuf,
    /// Channel looked up by name on start-up
    pub status_channel_name: String,
    /// Skips the name lookup when set
    pub status_channel_id: Option<u64>,
    /// Zone for resolving, rendering and stamping times
    pub timezone: Tz,
    pub log_level: Level,
}

impl BotConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = var("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| eyre!("DISCORD_TOKEN environment variable not set"))?;

        let data_dir = var("RF_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let status_channel_name =
            var("RF_STATUS_CHANNEL").unwrap_or_else(|| DEFAULT_STATUS_CHANNEL.to_string());

        let status_channel_id = var("RF_STATUS_CHANNEL_ID")
            .map(|id| {
                id.trim()
                    .parse::<u64>()
                    .map_err(|_| eyre!("RF_STATUS_CHANNEL_ID must be a valid u64"))
            })
            .transpose()?;

        let timezone = match var("RF_TIMEZONE") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|e| eyre!("RF_TIMEZONE is not a valid IANA zone: {}", e))?,
            None => DEFAULT_TIMEZONE,
        };

        let log_level = match var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        Ok(Self {
            token,
            data_dir,
            status_channel_name,
            status_channel_id,
            timezone,
            log_level,
        })
    }
}
