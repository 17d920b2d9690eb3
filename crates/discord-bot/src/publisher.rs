use async_trait::async_trait;
use eyre::Result;
use rfslot_core::render::StatusView;
use rfslot_db::repositories::MessageHandleRepository;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of trying to edit the status message in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Edited,
    /// The message was deleted on the platform side.
    Missing,
}

/// The channel the status message lives in.
///
/// Implemented over serenity by [`ChannelBoard`](crate::handlers::board::ChannelBoard).
#[async_trait]
pub trait StatusBoard: Send + Sync {
    /// Post a new status message and return its id.
    async fn send(&self, view: &StatusView) -> Result<u64>;

    async fn edit(&self, message_id: u64, view: &StatusView) -> Result<EditOutcome>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Published {
    Edited(u64),
    Sent(u64),
    /// The stored message was gone, so a replacement was posted.
    Resent { stale: u64, message_id: u64 },
}

impl Published {
    pub fn message_id(self) -> u64 {
        match self {
            Published::Edited(id) | Published::Sent(id) => id,
            Published::Resent { message_id, .. } => message_id,
        }
    }
}

/// Keeps exactly one live status message per channel.
///
/// Edits the stored message when there is one, and otherwise posts a new
/// message and remembers its id. A stored message that was deleted is
/// replaced transparently. A deletion racing between the check and the
/// edit is not guarded against.
pub struct Publisher {
    handles: Arc<dyn MessageHandleRepository>,
}

impl Publisher {
    pub fn new(handles: Arc<dyn MessageHandleRepository>) -> Self {
        Self { handles }
    }

    pub async fn publish(&self, board: &dyn StatusBoard, view: &StatusView) -> Result<Published> {
        let Some(message_id) = self.handles.load().await? else {
            let message_id = self.send_new(board, view).await?;
            info!("Status message {} posted", message_id);
            return Ok(Published::Sent(message_id));
        };

        match board.edit(message_id, view).await? {
            EditOutcome::Edited => Ok(Published::Edited(message_id)),
            EditOutcome::Missing => {
                warn!("Status message {} no longer exists, posting a new one", message_id);
                let replacement = self.send_new(board, view).await?;
                Ok(Published::Resent {
                    stale: message_id,
                    message_id: replacement,
                })
            }
        }
    }

    async fn send_new(&self, board: &dyn StatusBoard, view: &StatusView) -> Result<u64> {
        let message_id = board.send(view).await?;
        self.handles.save(message_id).await?;
        Ok(message_id)
    }
}
