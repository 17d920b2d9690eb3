use async_trait::async_trait;
use eyre::Result;
use tracing::info;

use super::MessageHandleRepository;
use super::json::JsonDocument;
use crate::models::DbMessageHandle;
use crate::schema::MESSAGE_HANDLE_FILE;
use crate::DataDir;

/// Handle of the status message, kept in `monitor_message.json` so a
/// restarted bot edits the same message instead of posting a new one.
#[derive(Debug, Clone)]
pub struct FileMessageHandleRepository {
    doc: JsonDocument<DbMessageHandle>,
}

impl FileMessageHandleRepository {
    pub fn new(dir: &DataDir) -> Self {
        Self {
            doc: JsonDocument::new(dir.document(MESSAGE_HANDLE_FILE)),
        }
    }
}

#[async_trait]
impl MessageHandleRepository for FileMessageHandleRepository {
    async fn load(&self) -> Result<Option<u64>> {
        Ok(self.doc.read().await?.map(|handle| handle.message_id))
    }

    async fn save(&self, message_id: u64) -> Result<()> {
        self.doc.write(&DbMessageHandle { message_id }).await?;
        info!("Status message handle {} stored in {}", message_id, self.doc.path().display());
        Ok(())
    }
}
