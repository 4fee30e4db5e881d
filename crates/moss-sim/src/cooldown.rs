//! Stat-scaled action cooldowns.
//!
//! A base cooldown is multiplied by a stepped factor keyed to the stat
//! the action tends: fullness for feeding, happiness for play, bond for
//! petting. The lower the stat, the sooner the action may be repeated.
//! The length is fixed when the action is applied.

use chrono::{DateTime, Utc};
use moss_types::{Action, PetState};

use crate::clock;
use crate::config::VitalsConfig;

/// Stepped multiplier for a stat value.
pub fn multiplier(stat: f64) -> f64 {
    if stat < 20.0 {
        0.25
    } else if stat < 40.0 {
        0.5
    } else if stat < 60.0 {
        0.75
    } else {
        1.0
    }
}

/// Base cooldown for an action, in seconds. `Wake` has none.
pub const fn base_secs(action: Action, config: &VitalsConfig) -> f64 {
    match action {
        Action::Feed => config.feed_cooldown_secs,
        Action::Play => config.play_cooldown_secs,
        Action::Pet => config.pet_cooldown_secs,
        Action::Wake => 0.0,
    }
}

/// Stat that scales an action's cooldown.
pub const fn relevant_stat(state: &PetState, action: Action) -> f64 {
    match action {
        Action::Feed => state.fullness,
        Action::Play => state.happiness,
        Action::Pet | Action::Wake => state.bond,
    }
}

/// Effective cooldown in seconds for the state's current stats.
///
/// Used to fix the length of a cooldown as it starts.
pub fn effective_secs(state: &PetState, action: Action, config: &VitalsConfig) -> f64 {
    base_secs(action, config) * multiplier(relevant_stat(state, action))
}

/// Seconds left before `action` may be applied again.
///
/// Zero if the action has never happened, and zero at or after the
/// cooldown boundary.
pub fn remaining_secs(state: &PetState, action: Action, now: DateTime<Utc>) -> f64 {
    state.cooldowns.last(action).map_or(0.0, |cooldown| {
        let elapsed = clock::elapsed_secs(cooldown.at, now);
        (cooldown.secs - elapsed).max(0.0)
    })
}

/// Whether `action` is still cooling down at `now`.
pub fn is_cooling_down(state: &PetState, action: Action, now: DateTime<Utc>) -> bool {
    remaining_secs(state, action, now) > 0.0
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use moss_types::CreatureId;

    use super::*;
    use crate::vitals;

    fn fed_at(fullness: f64) -> (PetState, DateTime<Utc>) {
        let now = Utc
            .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .unwrap_or_default();
        let mut state = vitals::hatch(CreatureId::new(), now, 0);
        state.fullness = fullness;
        let secs = effective_secs(&state, Action::Feed, &VitalsConfig::default());
        state.cooldowns.stamp(Action::Feed, now, secs);
        (state, now)
    }

    #[test]
    fn multiplier_steps() {
        assert!((multiplier(10.0) - 0.25).abs() < f64::EPSILON);
        assert!((multiplier(20.0) - 0.5).abs() < f64::EPSILON);
        assert!((multiplier(45.0) - 0.75).abs() < f64::EPSILON);
        assert!((multiplier(60.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn never_used_action_is_ready() {
        let (state, now) = fed_at(80.0);
        assert!(remaining_secs(&state, Action::Play, now).abs() < f64::EPSILON);
        assert!(!is_cooling_down(&state, Action::Wake, now));
    }

    #[test]
    fn hungry_creature_can_be_fed_sooner() {
        let (full, now) = fed_at(80.0);
        let (starving, _) = fed_at(10.0);
        assert!((remaining_secs(&full, Action::Feed, now) - 30.0).abs() < 1e-9);
        assert!((remaining_secs(&starving, Action::Feed, now) - 7.5).abs() < 1e-9);
    }

    #[test]
    fn remaining_is_non_increasing_and_hits_zero() {
        let (state, fed) = fed_at(80.0);
        let mut previous = f64::MAX;
        for step in 0..=40 {
            let now = fed + Duration::seconds(step);
            let remaining = remaining_secs(&state, Action::Feed, now);
            assert!(remaining <= previous);
            previous = remaining;
        }
        let boundary = fed + Duration::seconds(30);
        assert!(remaining_secs(&state, Action::Feed, boundary).abs() < f64::EPSILON);
        assert!(!is_cooling_down(&state, Action::Feed, boundary));
    }

    #[test]
    fn sleeping_recovery_does_not_stretch_a_running_cooldown() {
        let config = VitalsConfig::default();
        let played = Utc
            .with_ymd_and_hms(2025, 6, 1, 23, 0, 0)
            .single()
            .unwrap_or_default();
        let mut state = vitals::hatch(CreatureId::new(), played - Duration::hours(2), 0);
        state.sleeping = true;
        state.happiness = 39.5;
        state.last_update_time = played;
        let outcome = crate::actions::apply(&mut state, Action::Play, played, &config);
        assert!(outcome.applied);
        let started = remaining_secs(&state, Action::Play, played);
        assert!((started - 30.0).abs() < 1e-9);

        // Asleep, happiness climbs past 40 within the cooldown.
        let mut previous = started;
        for step in 1..=40 {
            let now = played + Duration::seconds(step);
            let current = vitals::current_state(&state, now, &config);
            let remaining = remaining_secs(&current, Action::Play, now);
            assert!(remaining <= previous, "rose from {previous} to {remaining} at {step}s");
            previous = remaining;
        }
        let later = vitals::current_state(&state, played + Duration::seconds(20), &config);
        assert!(later.happiness >= 40.0);
    }
}
