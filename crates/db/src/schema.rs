use eyre::{Result, WrapErr};
use tracing::info;

use crate::DataDir;

/// `{ "rf": [31, 32] }`
pub const RESOURCE_LIST_FILE: &str = "rf_list.json";
/// `{ "2026-01-10": [{ "rf": 31, "time": "23:00", "name": "Lan" }] }`
pub const SLOT_LEDGER_FILE: &str = "rf_slots.json";
/// `{ "message_id": 1234567890 }`
pub const MESSAGE_HANDLE_FILE: &str = "monitor_message.json";

pub async fn initialize_storage(dir: &DataDir) -> Result<()> {
    info!("Initializing storage in {}", dir.root().display());

    tokio::fs::create_dir_all(dir.root())
        .await
        .wrap_err_with(|| format!("Failed to create data directory {}", dir.root().display()))?;

    for file in [RESOURCE_LIST_FILE, SLOT_LEDGER_FILE, MESSAGE_HANDLE_FILE] {
        let path = dir.document(file);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            info!("Found {}", path.display());
        }
    }

    Ok(())
}
