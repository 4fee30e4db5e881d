//! Lazy decay of the creature's stats, mood classification, and birth.
//!
//! Time is advanced only when someone needs the current state. Ticks of
//! `tick_interval` seconds sit on a fixed grid counted from birth, so
//! advancing in many short steps lands on the same result as one long
//! step. A step that covers part of a tick applies a linearly scaled
//! share of that tick's stat deltas. The result depends only on
//! `(state, now)`, so recomputing at the same instant is a no-op.
//!
//! Per tick:
//!
//! - Dormant (`hp == 0`): nothing changes
//! - Egg stage (judged at the tick's start): fullness and happiness are
//!   left alone
//! - Asleep: fullness decays at the sleep rate, happiness recovers
//! - Awake: fullness and happiness decay scaled by `1 - protection`,
//!   where `protection = max(0, (bond - 50) / 100)`; bond decays
//! - Every stat is clamped to `[0, 100]`
//!
//! `hp` drifts toward the mean of the other three stats each time a tick
//! boundary is crossed. A trailing partial tick leaves `hp` alone until
//! a later step completes that tick.

use chrono::{DateTime, Utc};
use moss_types::{
    CareMetrics, CooldownTimes, CreatureId, Mood, PetState, Personality, Stage, TimeOfDay,
};

use crate::clock;
use crate::config::VitalsConfig;
use crate::personality;

/// Lower bound of every stat.
pub const STAT_MIN: f64 = 0.0;
/// Upper bound of every stat.
pub const STAT_MAX: f64 = 100.0;

/// Bond level above which care stops wearing off as fast.
const PROTECTION_PIVOT: f64 = 50.0;

const BIRTH_FULLNESS: f64 = 70.0;
const BIRTH_HAPPINESS: f64 = 70.0;
const BIRTH_BOND: f64 = 50.0;
const BIRTH_HP: f64 = 100.0;

/// Create a newborn creature.
///
/// A creature born at local night starts asleep.
pub fn hatch(creature_id: CreatureId, now: DateTime<Utc>, utc_offset_minutes: i32) -> PetState {
    PetState {
        creature_id,
        fullness: BIRTH_FULLNESS,
        happiness: BIRTH_HAPPINESS,
        bond: BIRTH_BOND,
        hp: BIRTH_HP,
        dormant: false,
        sleeping: clock::time_of_day(now, utc_offset_minutes) == TimeOfDay::Night,
        stage: Stage::Egg,
        personality: Personality::Shy,
        care: CareMetrics {
            total_interactions: 0,
            last_interaction_at: now,
            avg_fullness: BIRTH_FULLNESS,
            avg_bond: BIRTH_BOND,
        },
        message: String::new(),
        last_action: None,
        runtime_pool: None,
        pool_generated_at: None,
        cooldowns: CooldownTimes::default(),
        last_update_time: now,
        created_at: now,
        generation: 1,
        utc_offset_minutes,
    }
}

/// Whether the creature is dormant.
///
/// Dormancy starts when `hp` reaches zero and persists through partial
/// recovery until an action clears the flag.
pub const fn is_dormant(state: &PetState) -> bool {
    state.dormant || state.hp <= STAT_MIN
}

/// Clamp one stat value into `[0, 100]`. NaN becomes 0.
pub fn clamp_stat(value: f64) -> f64 {
    if value.is_nan() {
        return STAT_MIN;
    }
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Clamp all four stats into `[0, 100]`.
pub fn clamp_stats(state: &mut PetState) {
    state.fullness = clamp_stat(state.fullness);
    state.happiness = clamp_stat(state.happiness);
    state.bond = clamp_stat(state.bond);
    state.hp = clamp_stat(state.hp);
}

/// Priority-ordered mood classification.
pub fn mood(state: &PetState) -> Mood {
    if is_dormant(state) {
        Mood::Tun
    } else if state.sleeping {
        Mood::Sleeping
    } else if state.hp < 20.0 {
        Mood::Critical
    } else if state.fullness < 20.0 {
        Mood::Hungry
    } else if state.happiness < 20.0 {
        Mood::Sad
    } else if state.bond < 20.0 {
        Mood::Lonely
    } else if state.happiness > 70.0 && state.fullness > 50.0 {
        Mood::Happy
    } else {
        Mood::Neutral
    }
}

/// Advance stats from `last_update_time` to `now` and refresh the stage.
///
/// Never moves time backwards: a `now` earlier than `last_update_time`
/// leaves the stats untouched.
pub fn advance(state: &mut PetState, now: DateTime<Utc>, config: &VitalsConfig) {
    let interval = effective_interval(config);
    let elapsed = clock::elapsed_secs(state.last_update_time, now);

    if elapsed > 0.0 {
        let mut age = clock::elapsed_secs(state.created_at, state.last_update_time).max(0.0);
        let end = age + elapsed;
        while age < end && !is_dormant(state) {
            let tick_start = (age / interval).floor() * interval;
            let mut boundary = tick_start + interval;
            if boundary <= age {
                boundary += interval;
            }
            let step_end = boundary.min(end);
            if step_end <= age {
                break;
            }
            decay(state, (step_end - age) / interval, tick_start, config);
            if step_end >= boundary {
                drift_hp(state, config);
            }
            settle(state);
            age = step_end;
        }
        state.last_update_time = now;
    }

    state.stage = clock::stage_at(state.created_at, now.max(state.last_update_time), config);
}

/// Bring a state fully up to date at `now`.
///
/// Applies decay, refreshes the cached stage, and re-derives the cached
/// personality from the same snapshot of care metrics and bond.
pub fn refresh(state: &mut PetState, now: DateTime<Utc>, config: &VitalsConfig) {
    advance(state, now, config);
    state.personality = personality::derive(&state.care, state.bond, now, config);
}

/// Copying form of [`refresh`], for read-only callers.
pub fn current_state(state: &PetState, now: DateTime<Utc>, config: &VitalsConfig) -> PetState {
    let mut current = state.clone();
    refresh(&mut current, now, config);
    current
}

/// Tick length, falling back to the default for non-positive values.
fn effective_interval(config: &VitalsConfig) -> f64 {
    if config.tick_interval_secs > 0.0 {
        config.tick_interval_secs
    } else {
        VitalsConfig::default().tick_interval_secs
    }
}

/// Stat deltas for `fraction` of a tick (1.0 for a whole tick).
///
/// `tick_start_secs` is the creature's age when the tick began.
fn decay(state: &mut PetState, fraction: f64, tick_start_secs: f64, config: &VitalsConfig) {
    #[allow(clippy::cast_precision_loss)]
    let in_egg = tick_start_secs < config.egg_until_secs as f64;

    if state.sleeping {
        if !in_egg {
            state.fullness -= config.sleep_fullness_decay * fraction;
            state.happiness += config.sleep_happiness_recovery * fraction;
        }
    } else {
        let protection = ((state.bond - PROTECTION_PIVOT) / 100.0).max(0.0);
        let scale = (1.0 - protection) * fraction;
        if !in_egg {
            state.fullness -= config.fullness_decay * scale;
            state.happiness -= config.happiness_decay * scale;
        }
        state.bond -= config.bond_decay * fraction;
    }
}

/// End-of-tick `hp` trend toward the mean of the other stats.
fn drift_hp(state: &mut PetState, config: &VitalsConfig) {
    let target = (state.fullness + state.happiness + state.bond) / 3.0;
    if state.hp > target {
        state.hp -= config.hp_decay;
    } else if state.hp < target {
        state.hp += if state.sleeping {
            config.sleep_hp_recovery
        } else {
            config.hp_recovery
        };
    }
}

fn settle(state: &mut PetState) {
    clamp_stats(state);
    if state.hp <= STAT_MIN {
        state.dormant = true;
    }
}
