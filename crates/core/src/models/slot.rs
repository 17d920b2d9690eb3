use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{SlotError, SlotResult};
use crate::models::resource::ResourceId;

/// Wall-clock time of day at which a slot ends, minute precision.
///
/// Serialized as `"HH:MM"`. Field order gives chronological ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime {
    hour: u8,
    minute: u8,
}

impl SlotTime {
    pub fn new(hour: u8, minute: u8) -> SlotResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(SlotError::InvalidTime(format!("{}:{}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn to_naive(self) -> NaiveTime {
        // Range is checked on construction, so this never falls back.
        NaiveTime::from_hms_opt(self.hour.into(), self.minute.into(), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for SlotTime {
    type Err = SlotError;

    /// Accepts `H:MM` or `HH:MM`, surrounding whitespace ignored.
    fn from_str(input: &str) -> SlotResult<Self> {
        let trimmed = input.trim();
        let invalid = || SlotError::InvalidTime(trimmed.to_string());

        let (hour, minute) = trimmed.split_once(':').ok_or_else(invalid)?;
        let is_part = |part: &str, max_len: usize| {
            !part.is_empty() && part.len() <= max_len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !is_part(hour, 2) || minute.len() != 2 || !is_part(minute, 2) {
            return Err(invalid());
        }

        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for SlotTime {
    type Error = SlotError;

    fn try_from(value: String) -> SlotResult<Self> {
        value.parse()
    }
}

impl From<SlotTime> for String {
    fn from(time: SlotTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One active reservation. Identified by its `resource` across the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub resource: ResourceId,
    pub end_time: SlotTime,
    pub holder: String,
}

impl Slot {
    pub fn new(resource: ResourceId, end_time: SlotTime, holder: impl Into<String>) -> Self {
        Self {
            resource,
            end_time,
            holder: holder.into(),
        }
    }
}
