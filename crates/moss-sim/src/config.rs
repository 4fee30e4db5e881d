//! Tunable constants for decay, cooldowns, and personality.
//!
//! [`VitalsConfig`] bundles every tunable so callers (actors, tests) can
//! override the defaults. The engine reads it from the `vitals` section
//! of `moss-config.yaml`; every field falls back to its default.

use serde::Deserialize;

/// Configuration for the creature's stat mechanics.
///
/// Rates are expressed per full tick of `tick_interval_secs` seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Length of one decay tick in seconds (default: 10).
    pub tick_interval_secs: f64,

    /// Fullness lost per awake tick before bond protection (default: 2).
    pub fullness_decay: f64,
    /// Happiness lost per awake tick before bond protection (default: 1).
    pub happiness_decay: f64,
    /// Bond lost per awake tick (default: 0.5).
    pub bond_decay: f64,
    /// Fullness lost per sleeping tick (default: 1).
    pub sleep_fullness_decay: f64,
    /// Happiness gained per sleeping tick (default: 0.5).
    pub sleep_happiness_recovery: f64,

    /// `hp` lost per tick while above the mean of the other stats (default: 2).
    pub hp_decay: f64,
    /// `hp` gained per awake tick while below that mean (default: 1).
    pub hp_recovery: f64,
    /// `hp` gained per sleeping tick while below that mean (default: 1.5).
    pub sleep_hp_recovery: f64,

    /// Age in seconds at which the egg hatches (default: 60).
    pub egg_until_secs: i64,
    /// Age in seconds at which a baby becomes a teen (default: 300).
    pub baby_until_secs: i64,
    /// Age in seconds at which a teen becomes an adult (default: 900).
    pub teen_until_secs: i64,
    /// Age in seconds at which an adult becomes an elder (default: 3600).
    pub adult_until_secs: i64,

    /// Base feed cooldown in seconds (default: 30).
    pub feed_cooldown_secs: f64,
    /// Base play cooldown in seconds (default: 60).
    pub play_cooldown_secs: f64,
    /// Base pet cooldown in seconds (default: 10).
    pub pet_cooldown_secs: f64,

    /// Smoothing factor for the care-metric moving averages (default: 0.1).
    pub ema_alpha: f64,
    /// Seconds without interaction after which the creature feels neglected
    /// (default: 7200).
    pub neglect_after_secs: i64,
    /// Interaction count below which the creature still feels neglected
    /// (default: 10).
    pub neglect_min_interactions: u32,

    /// Stat level below which a need is raised (default: 60).
    pub need_threshold: f64,
    /// `hp` below which the need is critical (default: 40).
    pub critical_hp: f64,
    /// `hp` at which a dormant creature counts as revived (default: 20).
    pub revive_hp: f64,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 10.0,
            fullness_decay: 2.0,
            happiness_decay: 1.0,
            bond_decay: 0.5,
            sleep_fullness_decay: 1.0,
            sleep_happiness_recovery: 0.5,
            hp_decay: 2.0,
            hp_recovery: 1.0,
            sleep_hp_recovery: 1.5,
            egg_until_secs: 60,
            baby_until_secs: 300,
            teen_until_secs: 900,
            adult_until_secs: 3600,
            feed_cooldown_secs: 30.0,
            play_cooldown_secs: 60.0,
            pet_cooldown_secs: 10.0,
            ema_alpha: 0.1,
            neglect_after_secs: 7200,
            neglect_min_interactions: 10,
            need_threshold: 60.0,
            critical_hp: 40.0,
            revive_hp: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "tick_interval_secs: 5.0\npet_cooldown_secs: 3.0\n";
        let config: VitalsConfig = serde_yml::from_str(yaml).unwrap_or_default();
        assert!((config.tick_interval_secs - 5.0).abs() < f64::EPSILON);
        assert!((config.pet_cooldown_secs - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.adult_until_secs, 3600);
        assert_eq!(config.neglect_min_interactions, 10);
    }
}
