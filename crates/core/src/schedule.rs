// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Next-fire computation for the recurring-schedule trigger
//!
//! The trigger is invoked on an hourly external cadence; a schedule fires
//! only when its next occurrence falls inside the upcoming hour. All
//! calendar math is UTC.

use crate::config::{ScheduleConfig, ScheduleFrequency};
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minutes until the schedule's next occurrence, if it falls within the
/// next 60 minutes. Returns `None` when the schedule should not fire on
/// this trigger invocation.
pub fn minutes_until_fire(config: &ScheduleConfig, now_ms: u64) -> Option<u32> {
    let now: DateTime<Utc> = Utc.timestamp_millis_opt(now_ms as i64).single()?;

    let diff = match config.frequency {
        ScheduleFrequency::Hourly => {
            // Only the configured minute-of-hour matters; the next
            // occurrence is always within the hour.
            (config.minute + 60 - now.minute()) % 60
        }
        ScheduleFrequency::Daily => daily_diff(config, &now),
        ScheduleFrequency::Weekly => {
            let weekday = config.weekday?;
            if weekday != now.weekday().num_days_from_sunday() {
                return None;
            }
            daily_diff(config, &now)
        }
        ScheduleFrequency::Monthly => {
            let day = config.day_of_month?;
            if day != now.day() {
                return None;
            }
            daily_diff(config, &now)
        }
    };

    (diff < 60).then_some(diff)
}

/// Minutes from now until the configured time-of-day, wrapping to the next
/// day when the time has already passed.
fn daily_diff(config: &ScheduleConfig, now: &DateTime<Utc>) -> u32 {
    let config_minutes = config.hour * 60 + config.minute;
    let current_minutes = now.hour() * 60 + now.minute();
    if current_minutes <= config_minutes {
        config_minutes - current_minutes
    } else {
        MINUTES_PER_DAY - (current_minutes - config_minutes)
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
