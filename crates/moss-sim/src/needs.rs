//! Need detection and the post-action grace window.

use chrono::{DateTime, Utc};
use moss_types::{Need, PetState};

use crate::config::VitalsConfig;
use crate::{clock, vitals};

/// The single most urgent need, if any.
///
/// Nothing is needed while asleep or dormant. Low `hp` outranks the
/// rest; otherwise the lowest stat under the threshold wins, with ties
/// resolved food first, then play, then affection.
pub fn most_urgent(state: &PetState, config: &VitalsConfig) -> Option<Need> {
    if state.sleeping || vitals::is_dormant(state) {
        return None;
    }
    if state.hp < config.critical_hp {
        return Some(Need::Critical);
    }

    let threshold = config.need_threshold;
    let (fullness, happiness, bond) = (state.fullness, state.happiness, state.bond);

    if fullness < threshold && fullness <= happiness && fullness <= bond {
        Some(Need::Food)
    } else if happiness < threshold && happiness <= bond {
        Some(Need::Play)
    } else if bond < threshold {
        Some(Need::Affection)
    } else {
        None
    }
}

/// When the creature was last acted on, if ever.
pub const fn last_acted_at(state: &PetState) -> Option<DateTime<Utc>> {
    if state.care.total_interactions == 0 {
        None
    } else {
        Some(state.care.last_interaction_at)
    }
}

/// Whether an action landed less than `grace_secs` before `now`.
///
/// An action stamped after `now` (clock disagreement between actors)
/// counts as inside the window.
pub fn within_grace(state: &PetState, now: DateTime<Utc>, grace_secs: f64) -> bool {
    last_acted_at(state).is_some_and(|at| clock::elapsed_secs(at, now) < grace_secs)
}
