//! Load/save contracts for the three persisted documents.
//!
//! Every mutating operation loads a fresh copy and writes the whole document
//! back; nothing is cached between calls.

use async_trait::async_trait;
use eyre::Result;
use rfslot_core::models::{ledger::SlotLedger, resource::ResourceRegistry};

mod json;
pub mod ledger;
pub mod message;
pub mod resource;

pub use ledger::FileLedgerRepository;
pub use message::FileMessageHandleRepository;
pub use resource::FileRegistryRepository;

#[async_trait]
pub trait RegistryRepository: Send + Sync {
    /// An absent document is an empty registry.
    async fn load(&self) -> Result<ResourceRegistry>;
    async fn save(&self, registry: &ResourceRegistry) -> Result<()>;
}

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// An absent document is an empty ledger.
    async fn load(&self) -> Result<SlotLedger>;
    async fn save(&self, ledger: &SlotLedger) -> Result<()>;
}

#[async_trait]
pub trait MessageHandleRepository: Send + Sync {
    /// Id of the live status message, if one was ever published.
    async fn load(&self) -> Result<Option<u64>>;
    async fn save(&self, message_id: u64) -> Result<()>;
}
