//! Turning form input into a concrete date and end time.
//!
//! All interpretation happens in the zone carried by `now`, which the
//! caller obtains from its configured [`Clock`](crate::clock::Clock).

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::errors::{SlotError, SlotResult};
use crate::models::slot::SlotTime;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(input: &str) -> SlotResult<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| SlotError::InvalidDate(trimmed.to_string()))
}

/// Resolve an `HH:MM` end time and an optional `YYYY-MM-DD` date.
///
/// With an explicit date the result is taken as given, even if it lies in
/// the past. Without one the slot lands on the next occurrence of the
/// time: today if it is still ahead of `now`, otherwise tomorrow.
pub fn resolve_target(
    time: &str,
    date: Option<&str>,
    now: &DateTime<Tz>,
) -> SlotResult<(NaiveDate, SlotTime)> {
    let end_time: SlotTime = time.parse()?;

    match date {
        Some(date) => Ok((parse_date(date)?, end_time)),
        None => next_occurrence(end_time, now),
    }
}

/// Date-less resolution kept for callers that never ask for a date.
pub fn resolve_same_day(time: &str, now: &DateTime<Tz>) -> SlotResult<(NaiveDate, SlotTime)> {
    next_occurrence(time.parse()?, now)
}

fn next_occurrence(end_time: SlotTime, now: &DateTime<Tz>) -> SlotResult<(NaiveDate, SlotTime)> {
    let today = now.date_naive();
    if today.and_time(end_time.to_naive()) > now.naive_local() {
        return Ok((today, end_time));
    }

    let tomorrow = today
        .succ_opt()
        .ok_or_else(|| SlotError::InvalidDate(today.to_string()))?;
    Ok((tomorrow, end_time))
}
