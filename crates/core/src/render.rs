//! Status rendering.
//!
//! [`Renderer::render`] is a pure function of the ledger and the current
//! instant. It produces a [`StatusView`] that the Discord layer turns into
//! an embed; no formatting for a particular platform happens here.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::models::ledger::SlotLedger;
use crate::models::resource::{ResourceId, ResourceRegistry};
use crate::models::slot::SlotTime;

const URGENT_MINUTES: i64 = 30;
const WARNING_MINUTES: i64 = 60;

/// How soon a slot frees up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// 30 minutes or less left, including slots already past.
    Urgent,
    /// Between 30 and 60 minutes left.
    Warning,
    Normal,
}

impl Urgency {
    pub fn from_remaining(remaining: Duration) -> Self {
        if remaining <= Duration::minutes(URGENT_MINUTES) {
            Self::Urgent
        } else if remaining <= Duration::minutes(WARNING_MINUTES) {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    pub fn from_minutes(minutes: i64) -> Self {
        Self::from_remaining(Duration::minutes(minutes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearestSlot {
    pub resource: ResourceId,
    pub end_time: SlotTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotLine {
    pub resource: ResourceId,
    pub end_time: SlotTime,
    pub holder: String,
    pub urgency: Urgency,
    /// Whole minutes until the end time; negative once it has passed.
    pub remaining_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Ordered by end time, then resource number.
    pub slots: Vec<SlotLine>,
}

impl DayGroup {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// Everything the shared status message shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub total_slots: usize,
    pub today_has_slots: bool,
    pub nearest: Option<NearestSlot>,
    /// One group per ledger date, ascending.
    pub days: Vec<DayGroup>,
    pub rendered_at: DateTime<Tz>,
}

/// Resource pool occupancy for the private status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub used: usize,
    pub free: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    tz: Tz,
}

impl Renderer {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn render(&self, ledger: &SlotLedger, now: &DateTime<Tz>) -> StatusView {
        let now = now.with_timezone(&self.tz);
        let today = now.date_naive();
        let current = now.naive_local();

        let nearest = ledger.nearest_upcoming(&now).map(|slot| NearestSlot {
            resource: slot.resource,
            end_time: slot.end_time,
        });

        let days = ledger
            .days()
            .map(|(date, slots)| {
                let mut lines: Vec<SlotLine> = slots
                    .iter()
                    .map(|slot| {
                        let remaining = date.and_time(slot.end_time.to_naive()) - current;
                        SlotLine {
                            resource: slot.resource,
                            end_time: slot.end_time,
                            holder: slot.holder.clone(),
                            urgency: Urgency::from_remaining(remaining),
                            remaining_minutes: remaining.num_minutes(),
                        }
                    })
                    .collect();
                lines.sort_by_key(|line| (line.end_time, line.resource));

                DayGroup {
                    date,
                    is_today: date == today,
                    slots: lines,
                }
            })
            .collect();

        StatusView {
            total_slots: ledger.total_count(),
            today_has_slots: !ledger.slots_on(today).is_empty(),
            nearest,
            days,
            rendered_at: now,
        }
    }

    /// Occupancy of the registered pool.
    ///
    /// `used` counts every resource the ledger holds, registered or not,
    /// so `free` is clamped at zero.
    pub fn status_counts(registry: &ResourceRegistry, ledger: &SlotLedger) -> StatusCounts {
        let total = registry.size();
        let used = ledger.used_resources().len();
        StatusCounts {
            total,
            used,
            free: total.saturating_sub(used),
        }
    }
}
