use async_trait::async_trait;
use eyre::Result;
use rfslot_core::models::ledger::SlotLedger;

use super::LedgerRepository;
use super::json::JsonDocument;
use crate::models::DbLedger;
use crate::schema::SLOT_LEDGER_FILE;
use crate::DataDir;

/// Slot ledger stored in `rf_slots.json`.
#[derive(Debug, Clone)]
pub struct FileLedgerRepository {
    doc: JsonDocument<DbLedger>,
}

impl FileLedgerRepository {
    pub fn new(dir: &DataDir) -> Self {
        Self {
            doc: JsonDocument::new(dir.document(SLOT_LEDGER_FILE)),
        }
    }
}

#[async_trait]
impl LedgerRepository for FileLedgerRepository {
    async fn load(&self) -> Result<SlotLedger> {
        let doc = self.doc.read().await?.unwrap_or_default();
        Ok(doc.into())
    }

    async fn save(&self, ledger: &SlotLedger) -> Result<()> {
        self.doc.write(&DbLedger::from(ledger)).await
    }
}
