//! Time-of-day trigger arithmetic
//!
//! Fixed-time jobs (the digest sessions) compute the duration until the next
//! occurrence of their configured `HH:MM` in local time, sleep, fire, and
//! repeat. The calculation is a pure function over a supplied "now" so tests
//! never touch the wall clock.

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};

use crate::error::{Error, Result};

/// Parse a fire time in `HH:MM` form
pub fn parse_fire_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| Error::config(format!("invalid time '{s}', expected HH:MM")))
}

/// Duration from now until the next local occurrence of `target`
pub fn duration_until(target: NaiveTime) -> std::time::Duration {
    duration_until_from(Local::now(), target)
        .to_std()
        .unwrap_or(std::time::Duration::ZERO)
}

/// Duration from `now` until the next occurrence of `target`
///
/// If `target` has already passed today, the next occurrence is tomorrow.
/// Around DST transitions an unrepresentable local time degrades to a
/// 24-hour wait rather than failing.
pub fn duration_until_from(now: DateTime<Local>, target: NaiveTime) -> Duration {
    let today = now.date_naive();

    let candidate = |date: chrono::NaiveDate| {
        Local
            .from_local_datetime(&date.and_time(target))
            .earliest()
    };

    if let Some(at) = candidate(today) {
        if at > now {
            return at.signed_duration_since(now);
        }
    }

    candidate(today + Duration::days(1))
        .map(|at| at.signed_duration_since(now))
        .unwrap_or_else(|| Duration::hours(24))
}
