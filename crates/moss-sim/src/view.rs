//! Read-only projection served by the creature's state query.

use chrono::{DateTime, Utc};
use moss_types::{Action, PetState, PetView};

use crate::config::VitalsConfig;
use crate::{clock, cooldown, vitals};

/// Project the state as it stands at `now` without mutating it.
pub fn view(state: &PetState, now: DateTime<Utc>, config: &VitalsConfig) -> PetView {
    let current = vitals::current_state(state, now, config);
    let remaining = |action| cooldown::remaining_secs(&current, action, now);

    PetView {
        creature_id: current.creature_id,
        fullness: current.fullness,
        happiness: current.happiness,
        bond: current.bond,
        hp: current.hp,
        stage: current.stage,
        mood: vitals::mood(&current),
        personality: current.personality,
        time_of_day: clock::time_of_day(now, current.utc_offset_minutes),
        sleeping: current.sleeping,
        message: current.message.clone(),
        last_action: current.last_action,
        age_seconds: clock::age_seconds(current.created_at, now),
        generation: current.generation,
        feed_cooldown: remaining(Action::Feed),
        play_cooldown: remaining(Action::Play),
        pet_cooldown: remaining(Action::Pet),
    }
}
