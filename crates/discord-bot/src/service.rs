//! The coordinating service behind every button and form.
//!
//! [`SlotDesk`] owns the storage repositories, the renderer and the single
//! lock that serializes mutating actions. Each mutation loads fresh
//! documents, applies the change, writes the whole document back and, for
//! slot changes, re-publishes the status message, all while holding the
//! lock. Status checks read without locking.

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use rfslot_core::{
    clock::Clock,
    errors::{SlotError, SlotResult},
    models::{
        ledger::Placement,
        resource::{ResourceAction, ResourceId},
    },
    render::{Renderer, StatusCounts, StatusView},
};
use rfslot_db::{
    DataDir,
    repositories::{
        FileLedgerRepository, FileMessageHandleRepository, FileRegistryRepository,
        LedgerRepository, MessageHandleRepository, RegistryRepository,
    },
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::publisher::{Published, Publisher, StatusBoard};

const UNKNOWN_HOLDER: &str = "Unknown";

/// Raw Fill Slot form input.
#[derive(Debug, Clone, Default)]
pub struct FillSlotForm {
    pub rf: String,
    pub end_time: String,
    /// Blank means "next occurrence of `end_time`".
    pub date: String,
    pub holder: String,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteSlotForm {
    pub rf: String,
}

#[derive(Debug, Clone, Default)]
pub struct ManageResourceForm {
    pub rf: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilledSlot {
    pub resource: ResourceId,
    pub placement: Placement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    Added(ResourceId),
    Removed(ResourceId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub counts: StatusCounts,
    pub checked_at: DateTime<Tz>,
}

/// One method per user action.
///
/// The Discord handler only ever talks to the bot through this trait.
#[async_trait]
pub trait SlotActions: Send + Sync {
    async fn fill_slot(&self, board: &dyn StatusBoard, form: FillSlotForm) -> SlotResult<FilledSlot>;

    async fn delete_slot(&self, board: &dyn StatusBoard, form: DeleteSlotForm) -> SlotResult<ResourceId>;

    /// Changes the pool only; the status message is left as it is.
    async fn manage_resource(&self, form: ManageResourceForm) -> SlotResult<ResourceChange>;

    async fn check_status(&self) -> SlotResult<StatusReport>;

    async fn refresh(&self, board: &dyn StatusBoard) -> SlotResult<Published>;
}

pub struct SlotDesk {
    registry: Arc<dyn RegistryRepository>,
    ledger: Arc<dyn LedgerRepository>,
    publisher: Publisher,
    renderer: Renderer,
    clock: Arc<dyn Clock>,
    lock: Mutex<()>,
}

impl SlotDesk {
    pub fn new(
        registry: Arc<dyn RegistryRepository>,
        ledger: Arc<dyn LedgerRepository>,
        handles: Arc<dyn MessageHandleRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            ledger,
            publisher: Publisher::new(handles),
            renderer: Renderer::new(clock.timezone()),
            clock,
            lock: Mutex::new(()),
        }
    }

    /// Desk backed by the JSON documents in `dir`.
    pub fn from_data_dir(dir: &DataDir, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Arc::new(FileRegistryRepository::new(dir)),
            Arc::new(FileLedgerRepository::new(dir)),
            Arc::new(FileMessageHandleRepository::new(dir)),
            clock,
        )
    }

    /// Render the current ledger without publishing it.
    pub async fn render(&self) -> SlotResult<StatusView> {
        let ledger = self.ledger.load().await?;
        Ok(self.renderer.render(&ledger, &self.clock.now()))
    }

    /// Caller must hold `self.lock`.
    async fn publish_locked(&self, board: &dyn StatusBoard) -> SlotResult<Published> {
        let view = self.render().await?;
        let published = self
            .publisher
            .publish(board, &view)
            .await
            .map_err(SlotError::Publish)?;
        info!("Status published: {:?}", published);
        Ok(published)
    }
}

#[async_trait]
impl SlotActions for SlotDesk {
    async fn fill_slot(&self, board: &dyn StatusBoard, form: FillSlotForm) -> SlotResult<FilledSlot> {
        let resource: ResourceId = form.rf.parse()?;
        let date = Some(form.date.trim()).filter(|date| !date.is_empty());
        let holder = match form.holder.trim() {
            "" => UNKNOWN_HOLDER,
            name => name,
        };

        let _guard = self.lock.lock().await;

        let mut ledger = self.ledger.load().await?;
        let placement = ledger
            .upsert(resource, &form.end_time, date, holder, &self.clock.now())
            .inspect_err(|e| warn!("Fill slot for RF {} rejected: {}", resource, e))?;
        self.ledger.save(&ledger).await?;
        info!(
            "RF {} filled until {} {} by {}",
            resource, placement.date, placement.end_time, holder
        );

        self.publish_locked(board).await?;

        Ok(FilledSlot { resource, placement })
    }

    async fn delete_slot(&self, board: &dyn StatusBoard, form: DeleteSlotForm) -> SlotResult<ResourceId> {
        let resource: ResourceId = form.rf.parse()?;

        let _guard = self.lock.lock().await;

        let mut ledger = self.ledger.load().await?;
        let (date, _) = ledger
            .delete_by_resource(resource)
            .inspect_err(|e| warn!("Delete slot rejected: {}", e))?;
        self.ledger.save(&ledger).await?;
        info!("RF {} slot on {} deleted", resource, date);

        self.publish_locked(board).await?;

        Ok(resource)
    }

    async fn manage_resource(&self, form: ManageResourceForm) -> SlotResult<ResourceChange> {
        let resource: ResourceId = form.rf.parse()?;
        let action: ResourceAction = form.action.parse()?;

        let _guard = self.lock.lock().await;

        let mut registry = self.registry.load().await?;
        let change = match action {
            ResourceAction::Add => registry.add(resource).map(|_| ResourceChange::Added(resource)),
            ResourceAction::Remove => {
                let ledger = self.ledger.load().await?;
                registry
                    .remove(resource, &ledger)
                    .map(|_| ResourceChange::Removed(resource))
            }
        }
        .inspect_err(|e| warn!("Manage RF {:?} for RF {} rejected: {}", action, resource, e))?;
        self.registry.save(&registry).await?;
        info!("Resource pool changed: {:?}, {} registered", change, registry.size());

        Ok(change)
    }

    async fn check_status(&self) -> SlotResult<StatusReport> {
        let registry = self.registry.load().await?;
        let ledger = self.ledger.load().await?;

        Ok(StatusReport {
            counts: Renderer::status_counts(&registry, &ledger),
            checked_at: self.clock.now(),
        })
    }

    async fn refresh(&self, board: &dyn StatusBoard) -> SlotResult<Published> {
        let _guard = self.lock.lock().await;
        self.publish_locked(board).await
    }
}
