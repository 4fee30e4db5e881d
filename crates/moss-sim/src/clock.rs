//! Wall-clock access and time-derived values.
//!
//! Actors read the current instant through [`Clock`] so the time source
//! can be swapped in tests. Stage and time of day are always derived
//! from timestamps, never stored as independent truth.

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use moss_types::{Stage, TimeOfDay};

use crate::config::VitalsConfig;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Seconds from `from` to `to`, millisecond precision, never negative.
#[allow(clippy::cast_precision_loss)]
pub fn elapsed_secs(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let millis = to.signed_duration_since(from).num_milliseconds();
    (millis.max(0) as f64) / 1000.0
}

/// Whole seconds since birth, never negative.
pub fn age_seconds(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(created_at).num_seconds().max(0)
}

/// Life stage for an age in seconds.
pub const fn stage_for_age(age_secs: i64, config: &VitalsConfig) -> Stage {
    if age_secs < config.egg_until_secs {
        Stage::Egg
    } else if age_secs < config.baby_until_secs {
        Stage::Baby
    } else if age_secs < config.teen_until_secs {
        Stage::Teen
    } else if age_secs < config.adult_until_secs {
        Stage::Adult
    } else {
        Stage::Elder
    }
}

/// Life stage of a creature born at `created_at`, observed at `now`.
pub fn stage_at(created_at: DateTime<Utc>, now: DateTime<Utc>, config: &VitalsConfig) -> Stage {
    stage_for_age(age_seconds(created_at, now), config)
}

/// Time of day for a local hour (0 to 23).
pub const fn time_of_day_for_hour(hour: u32) -> TimeOfDay {
    match hour {
        5..=7 => TimeOfDay::Dawn,
        8..=17 => TimeOfDay::Day,
        18..=21 => TimeOfDay::Dusk,
        _ => TimeOfDay::Night,
    }
}

/// Local hour at `now` for an owner `utc_offset_minutes` away from UTC.
///
/// Out-of-range offsets fall back to UTC.
pub fn local_hour(now: DateTime<Utc>, utc_offset_minutes: i32) -> u32 {
    utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .map_or_else(|| now.hour(), |offset| now.with_timezone(&offset).hour())
}

/// Local time of day at `now`.
pub fn time_of_day(now: DateTime<Utc>, utc_offset_minutes: i32) -> TimeOfDay {
    time_of_day_for_hour(local_hour(now, utc_offset_minutes))
}

/// Sleep change implied by moving from one time of day to the next.
///
/// Entering night puts the creature to sleep (`Some(true)`); entering
/// dawn wakes it (`Some(false)`). Anything else leaves it alone.
pub fn sleep_transition(previous: TimeOfDay, current: TimeOfDay) -> Option<bool> {
    if previous == current {
        return None;
    }
    match current {
        TimeOfDay::Night => Some(true),
        TimeOfDay::Dawn => Some(false),
        TimeOfDay::Day | TimeOfDay::Dusk => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn stage_thresholds() {
        let config = VitalsConfig::default();
        assert_eq!(stage_for_age(0, &config), Stage::Egg);
        assert_eq!(stage_for_age(59, &config), Stage::Egg);
        assert_eq!(stage_for_age(60, &config), Stage::Baby);
        assert_eq!(stage_for_age(299, &config), Stage::Baby);
        assert_eq!(stage_for_age(300, &config), Stage::Teen);
        assert_eq!(stage_for_age(900, &config), Stage::Adult);
        assert_eq!(stage_for_age(3600, &config), Stage::Elder);
        assert_eq!(stage_for_age(i64::MAX, &config), Stage::Elder);
    }

    #[test]
    fn hour_boundaries() {
        assert_eq!(time_of_day_for_hour(4), TimeOfDay::Night);
        assert_eq!(time_of_day_for_hour(5), TimeOfDay::Dawn);
        assert_eq!(time_of_day_for_hour(8), TimeOfDay::Day);
        assert_eq!(time_of_day_for_hour(17), TimeOfDay::Day);
        assert_eq!(time_of_day_for_hour(18), TimeOfDay::Dusk);
        assert_eq!(time_of_day_for_hour(22), TimeOfDay::Night);
        assert_eq!(time_of_day_for_hour(0), TimeOfDay::Night);
    }

    #[test]
    fn offset_shifts_local_hour() {
        let Some(noon_utc) = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single() else {
            return;
        };
        assert_eq!(time_of_day(noon_utc, 0), TimeOfDay::Day);
        // UTC+11 puts local time at 23:00.
        assert_eq!(time_of_day(noon_utc, 11 * 60), TimeOfDay::Night);
        // UTC-6 puts local time at 06:00.
        assert_eq!(time_of_day(noon_utc, -6 * 60), TimeOfDay::Dawn);
        // Nonsense offsets fall back to UTC.
        assert_eq!(local_hour(noon_utc, i32::MAX), 12);
    }

    #[test]
    fn sleep_follows_night_and_dawn() {
        assert_eq!(sleep_transition(TimeOfDay::Dusk, TimeOfDay::Night), Some(true));
        assert_eq!(sleep_transition(TimeOfDay::Night, TimeOfDay::Dawn), Some(false));
        assert_eq!(sleep_transition(TimeOfDay::Night, TimeOfDay::Night), None);
        assert_eq!(sleep_transition(TimeOfDay::Dawn, TimeOfDay::Day), None);
    }

    #[test]
    fn elapsed_never_negative() {
        let Some(earlier) = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single() else {
            return;
        };
        let later = earlier + chrono::Duration::milliseconds(2500);
        assert!((elapsed_secs(earlier, later) - 2.5).abs() < 1e-9);
        assert!(elapsed_secs(later, earlier).abs() < f64::EPSILON);
        assert_eq!(age_seconds(later, earlier), 0);
    }
}
