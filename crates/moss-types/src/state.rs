//! Creature state owned by the Pet Actor, plus its query projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Action, Mood, Personality, Stage, TimeOfDay};
use crate::ids::CreatureId;
use crate::pool::MessagePool;

/// Running care history. Updated only by user-initiated actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CareMetrics {
    /// Number of care actions ever applied.
    pub total_interactions: u32,
    /// Time of the most recent care action (birth time before the first).
    pub last_interaction_at: DateTime<Utc>,
    /// Exponential moving average of fullness at interaction time.
    pub avg_fullness: f64,
    /// Exponential moving average of bond at interaction time.
    pub avg_bond: f64,
}

/// A cooldown started by an applied action.
///
/// The length is fixed when the action is applied, so later stat changes
/// never stretch or shorten a running cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Cooldown {
    /// When the action was applied.
    pub at: DateTime<Utc>,
    /// Effective length in seconds.
    pub secs: f64,
}

/// The running cooldown of each cooldown-gated action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CooldownTimes {
    /// Last successful feed.
    pub last_feed: Option<Cooldown>,
    /// Last successful play.
    pub last_play: Option<Cooldown>,
    /// Last successful pet.
    pub last_pet: Option<Cooldown>,
}

impl CooldownTimes {
    /// Cooldown recorded for an action. `Wake` has none.
    pub const fn last(&self, action: Action) -> Option<Cooldown> {
        match action {
            Action::Feed => self.last_feed,
            Action::Play => self.last_play,
            Action::Pet => self.last_pet,
            Action::Wake => None,
        }
    }

    /// Start a cooldown of `secs` seconds at `at`. `Wake` is ignored.
    pub const fn stamp(&mut self, action: Action, at: DateTime<Utc>, secs: f64) {
        let cooldown = Some(Cooldown { at, secs });
        match action {
            Action::Feed => self.last_feed = cooldown,
            Action::Play => self.last_play = cooldown,
            Action::Pet => self.last_pet = cooldown,
            Action::Wake => {}
        }
    }

    /// Most recent of the three timestamps.
    pub fn most_recent(&self) -> Option<DateTime<Utc>> {
        [self.last_feed, self.last_play, self.last_pet]
            .into_iter()
            .flatten()
            .map(|cooldown| cooldown.at)
            .max()
    }
}

/// Full creature state.
///
/// `stage` and `personality` are caches of pure functions over the other
/// fields and `now`; they are refreshed whenever the state is advanced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PetState {
    /// Stable identity.
    pub creature_id: CreatureId,
    /// Satiation, 0 to 100.
    pub fullness: f64,
    /// Happiness, 0 to 100.
    pub happiness: f64,
    /// Attachment to the owner, 0 to 100.
    pub bond: f64,
    /// Vitality, 0 to 100.
    pub hp: f64,
    /// Set when `hp` hits zero. Cleared only once feeding or petting
    /// brings `hp` back to the revive level.
    pub dormant: bool,
    /// Whether the creature is asleep.
    pub sleeping: bool,
    /// Cached life stage.
    pub stage: Stage,
    /// Cached personality.
    pub personality: Personality,
    /// Care history used for personality derivation.
    pub care: CareMetrics,
    /// Line currently shown to the owner.
    pub message: String,
    /// Most recent applied action.
    pub last_action: Option<Action>,
    /// Generated message pool, when one has arrived.
    pub runtime_pool: Option<MessagePool>,
    /// When the last pool generation was started (stamped on trigger).
    pub pool_generated_at: Option<DateTime<Utc>>,
    /// Per-action cooldown stamps.
    pub cooldowns: CooldownTimes,
    /// Point in time the stats were last advanced to.
    pub last_update_time: DateTime<Utc>,
    /// Birth time. Never changes.
    pub created_at: DateTime<Utc>,
    /// Continuation counter, starting at 1.
    pub generation: u32,
    /// Owner's offset from UTC, in minutes, for the day/night rhythm.
    pub utc_offset_minutes: i32,
}

/// Read-only projection of [`PetState`] at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PetView {
    /// Stable identity.
    pub creature_id: CreatureId,
    /// Satiation.
    pub fullness: f64,
    /// Happiness.
    pub happiness: f64,
    /// Bond.
    pub bond: f64,
    /// Vitality.
    pub hp: f64,
    /// Life stage.
    pub stage: Stage,
    /// Classified mood.
    pub mood: Mood,
    /// Current personality.
    pub personality: Personality,
    /// Local time of day.
    pub time_of_day: TimeOfDay,
    /// Asleep or not.
    pub sleeping: bool,
    /// Line currently shown.
    pub message: String,
    /// Most recent applied action.
    pub last_action: Option<Action>,
    /// Whole seconds since birth.
    pub age_seconds: i64,
    /// Continuation counter.
    pub generation: u32,
    /// Seconds until feeding is allowed again.
    pub feed_cooldown: f64,
    /// Seconds until playing is allowed again.
    pub play_cooldown: f64,
    /// Seconds until petting is allowed again.
    pub pet_cooldown: f64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn most_recent_picks_latest_stamp() {
        let mut times = CooldownTimes::default();
        assert!(times.most_recent().is_none());

        let early = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).single();
        let late = Utc.with_ymd_and_hms(2025, 3, 1, 11, 0, 0).single();
        if let (Some(early), Some(late)) = (early, late) {
            times.stamp(Action::Pet, late, 10.0);
            times.stamp(Action::Feed, early, 22.5);
            times.stamp(Action::Wake, late, 1.0);
            assert_eq!(times.most_recent(), Some(late));
            let feed = times.last(Action::Feed).map(|c| (c.at, c.secs));
            assert_eq!(feed, Some((early, 22.5)));
            assert_eq!(times.last(Action::Wake), None);
        }
    }
}
