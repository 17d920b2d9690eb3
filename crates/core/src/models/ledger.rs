use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{SlotError, SlotResult};
use crate::models::resource::ResourceId;
use crate::models::slot::{Slot, SlotTime};
use crate::time;

/// Where an upserted slot ended up after time resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub date: NaiveDate,
    pub end_time: SlotTime,
}

/// All active slots, grouped by calendar date.
///
/// Two invariants hold after every mutation: a date key never maps to an
/// empty list, and a resource appears in at most one slot across all dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotLedger {
    days: BTreeMap<NaiveDate, Vec<Slot>>,
}

impl SlotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `time`/`date` input against `now` and store the slot there,
    /// replacing whatever slot `resource` held before.
    pub fn upsert(
        &mut self,
        resource: ResourceId,
        time: &str,
        date: Option<&str>,
        holder: impl Into<String>,
        now: &DateTime<Tz>,
    ) -> SlotResult<Placement> {
        let (date, end_time) = time::resolve_target(time, date, now)?;
        self.place(date, Slot::new(resource, end_time, holder));
        Ok(Placement { date, end_time })
    }

    /// Store an already resolved slot under `date`.
    pub fn place(&mut self, date: NaiveDate, slot: Slot) {
        self.take_resource(slot.resource);
        self.days.entry(date).or_default().push(slot);
    }

    /// Remove the slot held by `resource`, wherever it is.
    pub fn delete_by_resource(&mut self, resource: ResourceId) -> SlotResult<(NaiveDate, Slot)> {
        self.take_resource(resource)
            .into_iter()
            .next()
            .ok_or(SlotError::NotFound(resource))
    }

    /// Today's slot with the smallest non-negative time left.
    ///
    /// Ties go to the lowest resource number.
    pub fn nearest_upcoming(&self, now: &DateTime<Tz>) -> Option<&Slot> {
        let today = now.date_naive();
        let current = now.naive_local();

        self.days
            .get(&today)?
            .iter()
            .filter_map(|slot| {
                let delta = today.and_time(slot.end_time.to_naive()) - current;
                (delta >= Duration::zero()).then_some((delta, slot))
            })
            .min_by_key(|(delta, slot)| (*delta, slot.resource))
            .map(|(_, slot)| slot)
    }

    pub fn total_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn used_resources(&self) -> BTreeSet<ResourceId> {
        self.days
            .values()
            .flatten()
            .map(|slot| slot.resource)
            .collect()
    }

    pub fn contains_resource(&self, resource: ResourceId) -> bool {
        self.days
            .values()
            .flatten()
            .any(|slot| slot.resource == resource)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Dates in ascending order with their slots in insertion order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[Slot])> {
        self.days.iter().map(|(date, slots)| (*date, slots.as_slice()))
    }

    pub fn slots_on(&self, date: NaiveDate) -> &[Slot] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Remove every slot for `resource` and prune emptied dates.
    fn take_resource(&mut self, resource: ResourceId) -> Vec<(NaiveDate, Slot)> {
        let mut removed = Vec::new();
        for (date, slots) in self.days.iter_mut() {
            let (gone, kept): (Vec<Slot>, Vec<Slot>) = std::mem::take(slots)
                .into_iter()
                .partition(|slot| slot.resource == resource);
            *slots = kept;
            removed.extend(gone.into_iter().map(|slot| (*date, slot)));
        }
        self.days.retain(|_, slots| !slots.is_empty());
        removed
    }
}

impl FromIterator<(NaiveDate, Vec<Slot>)> for SlotLedger {
    /// Builds a ledger from stored days, dropping dates without slots.
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Vec<Slot>)>>(iter: I) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<Slot>> = BTreeMap::new();
        for (date, slots) in iter {
            days.entry(date).or_default().extend(slots);
        }
        days.retain(|_, slots| !slots.is_empty());
        Self { days }
    }
}
