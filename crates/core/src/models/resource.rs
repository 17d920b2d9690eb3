use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::{SlotError, SlotResult};
use crate::models::ledger::SlotLedger;

/// Number of a reservable RF unit. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ResourceId(u32);

impl ResourceId {
    pub fn new(value: u32) -> SlotResult<Self> {
        if value == 0 {
            return Err(SlotError::InvalidResource(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ResourceId {
    type Error = SlotError;

    fn try_from(value: u32) -> SlotResult<Self> {
        Self::new(value)
    }
}

impl From<ResourceId> for u32 {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl FromStr for ResourceId {
    type Err = SlotError;

    fn from_str(input: &str) -> SlotResult<Self> {
        let trimmed = input.trim();
        trimmed
            .parse::<u32>()
            .map_err(|_| SlotError::InvalidResource(trimmed.to_string()))
            .and_then(Self::new)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the Manage RF form asks the registry to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceAction {
    Add,
    Remove,
}

impl FromStr for ResourceAction {
    type Err = SlotError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(input: &str) -> SlotResult<Self> {
        match input.trim().to_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            other => Err(SlotError::InvalidAction(other.to_string())),
        }
    }
}

/// The pool of RF numbers that exist.
///
/// The registry is not consulted when slots are written, so the ledger may
/// reference numbers that were never added here. The only coupling is that
/// a number cannot be removed while a slot still holds it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceRegistry {
    ids: BTreeSet<ResourceId>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: ResourceId) -> SlotResult<()> {
        if !self.ids.insert(id) {
            return Err(SlotError::AlreadyExists(id));
        }
        Ok(())
    }

    /// Remove `id` unless a slot in `ledger` still references it.
    ///
    /// The in-use check runs first, so a number held by the ledger reports
    /// `InUse` even when it was never registered. That keeps "`InUse` if and
    /// only if the ledger holds the number" true for every registry state.
    pub fn remove(&mut self, id: ResourceId, ledger: &SlotLedger) -> SlotResult<()> {
        if ledger.contains_resource(id) {
            return Err(SlotError::InUse(id));
        }
        if !self.ids.remove(&id) {
            return Err(SlotError::NotFound(id));
        }
        Ok(())
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.ids.contains(&id)
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }

    /// All registered numbers in ascending order.
    pub fn all(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<ResourceId> for ResourceRegistry {
    fn from_iter<I: IntoIterator<Item = ResourceId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
