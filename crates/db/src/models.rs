use chrono::NaiveDate;
use rfslot_core::models::{
    ledger::SlotLedger,
    resource::{ResourceId, ResourceRegistry},
    slot::{Slot, SlotTime},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const UNKNOWN_HOLDER: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbResourceList {
    pub rf: Vec<ResourceId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbSlot {
    pub rf: ResourceId,
    pub time: SlotTime,
    #[serde(default = "unknown_holder")]
    pub name: String,
}

/// Slot document, keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DbLedger(pub BTreeMap<NaiveDate, Vec<DbSlot>>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbMessageHandle {
    pub message_id: u64,
}

fn unknown_holder() -> String {
    UNKNOWN_HOLDER.to_string()
}

impl From<&ResourceRegistry> for DbResourceList {
    fn from(registry: &ResourceRegistry) -> Self {
        Self {
            rf: registry.all().collect(),
        }
    }
}

impl From<DbResourceList> for ResourceRegistry {
    fn from(list: DbResourceList) -> Self {
        list.rf.into_iter().collect()
    }
}

impl From<&SlotLedger> for DbLedger {
    fn from(ledger: &SlotLedger) -> Self {
        Self(
            ledger
                .days()
                .map(|(date, slots)| (date, slots.iter().map(DbSlot::from).collect()))
                .collect(),
        )
    }
}

impl From<DbLedger> for SlotLedger {
    fn from(doc: DbLedger) -> Self {
        doc.0
            .into_iter()
            .map(|(date, slots)| (date, slots.into_iter().map(Slot::from).collect()))
            .collect()
    }
}

impl From<&Slot> for DbSlot {
    fn from(slot: &Slot) -> Self {
        Self {
            rf: slot.resource,
            time: slot.end_time,
            name: slot.holder.clone(),
        }
    }
}

impl From<DbSlot> for Slot {
    fn from(row: DbSlot) -> Self {
        Slot::new(row.rf, row.time, row.name)
    }
}
