//! Care actions: feed, play, pet, wake.
//!
//! Each action first brings the state up to `now`, then walks a fixed
//! branch table. Feed and play are refused during the egg stage; feed,
//! play and pet are refused while cooling down. An applied action folds
//! into the care metrics before its effects land, and the cached
//! personality is re-derived once the effects are clamped.

use chrono::{DateTime, Utc};
use moss_types::{Action, Category, Mood, PetState, Stage};
use rand::Rng;

use crate::config::VitalsConfig;
use crate::pool::PoolSelector;
use crate::{cooldown, personality, vitals};

/// Line shown when feeding or playing with an unhatched egg.
pub const EGG_REPLY: &str = "*the egg wobbles a little* ...still developing in here...";

/// Line shown when a sleeping creature is woken.
pub const WAKE_REPLY: &str =
    "*yawns and stretches all eight stubby legs* ...mm, such a nice dream...";

/// What the creature says in response to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Pick a line from this category.
    Line(Category),
    /// Show this fixed line.
    Literal(&'static str),
    /// Keep the current line.
    Silent,
}

impl Reply {
    /// Resolve into the new message text, or `None` to keep the current one.
    ///
    /// A category missing from every pool resolves to an empty line.
    pub fn resolve<R: Rng + ?Sized>(
        self,
        selector: &PoolSelector<'_>,
        rng: &mut R,
    ) -> Option<String> {
        match self {
            Self::Line(category) => {
                Some(selector.pick(category, rng).unwrap_or_default().to_owned())
            }
            Self::Literal(text) => Some(text.to_owned()),
            Self::Silent => None,
        }
    }
}

/// Result of applying one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The action that was requested.
    pub action: Action,
    /// What to say.
    pub reply: Reply,
    /// Whether the action changed care state (false when refused).
    pub applied: bool,
}

impl ActionOutcome {
    const fn refused(action: Action, reply: Reply) -> Self {
        Self {
            action,
            reply,
            applied: false,
        }
    }

    const fn applied(action: Action, reply: Reply) -> Self {
        Self {
            action,
            reply,
            applied: true,
        }
    }
}

/// Apply a care action to the state at `now`.
pub fn apply(
    state: &mut PetState,
    action: Action,
    now: DateTime<Utc>,
    config: &VitalsConfig,
) -> ActionOutcome {
    vitals::refresh(state, now, config);

    let outcome = match action {
        Action::Feed => feed(state, now, config),
        Action::Play => play(state, now, config),
        Action::Pet => pet(state, now, config),
        Action::Wake => wake(state, now, config),
    };

    vitals::clamp_stats(state);
    if outcome.applied {
        state.last_action = Some(action);
        let secs = cooldown::effective_secs(state, action, config);
        state.cooldowns.stamp(action, now, secs);
    }
    state.personality = personality::derive(&state.care, state.bond, now, config);
    outcome
}

/// Egg and cooldown gates, then bookkeeping for an accepted action.
///
/// Returns the refusal reply when the action may not proceed.
fn admit(
    state: &mut PetState,
    action: Action,
    cooldown_line: Category,
    now: DateTime<Utc>,
    config: &VitalsConfig,
) -> Option<Reply> {
    if state.stage == Stage::Egg && matches!(action, Action::Feed | Action::Play) {
        return Some(Reply::Literal(EGG_REPLY));
    }
    if cooldown::is_cooling_down(state, action, now) {
        return Some(Reply::Line(cooldown_line));
    }
    personality::record_interaction(&mut state.care, state.fullness, state.bond, now, config);
    None
}

/// Leave dormancy once `hp` reaches the revive level, else stay put.
fn revive_or(state: &mut PetState, still_dormant: Category, config: &VitalsConfig) -> Category {
    if state.hp >= config.revive_hp {
        state.dormant = false;
        Category::Reviving
    } else {
        state.dormant = true;
        still_dormant
    }
}

fn feed(state: &mut PetState, now: DateTime<Utc>, config: &VitalsConfig) -> ActionOutcome {
    if let Some(reply) = admit(state, Action::Feed, Category::FeedCooldown, now, config) {
        return ActionOutcome::refused(Action::Feed, reply);
    }

    let line = if vitals::is_dormant(state) {
        state.fullness += 15.0;
        state.hp += 5.0;
        revive_or(state, Category::FeedTun, config)
    } else if state.sleeping {
        Category::FeedSleeping
    } else if state.fullness > 90.0 {
        let cushion = if state.bond > 50.0 {
            (state.bond - 50.0) / 20.0
        } else {
            0.0
        };
        state.fullness += 5.0;
        state.happiness += cushion - 15.0;
        Category::FeedFull
    } else if state.fullness < 30.0 {
        state.fullness += 30.0;
        state.happiness += 8.0;
        Category::FeedHungry
    } else {
        state.fullness += 28.0;
        state.happiness += 5.0;
        Category::FeedSuccess
    };

    ActionOutcome::applied(Action::Feed, Reply::Line(line))
}

fn play(state: &mut PetState, now: DateTime<Utc>, config: &VitalsConfig) -> ActionOutcome {
    if let Some(reply) = admit(state, Action::Play, Category::PlayCooldown, now, config) {
        return ActionOutcome::refused(Action::Play, reply);
    }

    let line = if vitals::is_dormant(state) {
        Category::PlayTun
    } else if state.sleeping {
        Category::PlaySleeping
    } else if state.fullness < 20.0 || state.hp < 30.0 {
        state.happiness += 8.0;
        state.fullness -= 3.0;
        Category::PlayTired
    } else {
        state.happiness += 25.0;
        state.fullness -= 8.0;
        state.bond += 8.0;
        vitals::clamp_stats(state);
        if vitals::mood(state) == Mood::Happy {
            Category::PlayHappy
        } else {
            Category::PlaySuccess
        }
    };

    ActionOutcome::applied(Action::Play, Reply::Line(line))
}

fn pet(state: &mut PetState, now: DateTime<Utc>, config: &VitalsConfig) -> ActionOutcome {
    if let Some(reply) = admit(state, Action::Pet, Category::PetCooldown, now, config) {
        return ActionOutcome::refused(Action::Pet, reply);
    }

    let line = if vitals::is_dormant(state) {
        state.bond += 5.0;
        state.hp += 2.0;
        revive_or(state, Category::PetTun, config)
    } else if state.sleeping {
        state.bond += 5.0;
        Category::PetSleeping
    } else if state.bond > 90.0 {
        state.bond += 10.0;
        state.happiness += 8.0;
        Category::PetMaxBond
    } else {
        state.bond += 15.0;
        state.happiness += 8.0;
        vitals::clamp_stats(state);
        if matches!(vitals::mood(state), Mood::Sad | Mood::Hungry) {
            Category::PetLowMood
        } else {
            Category::PetSuccess
        }
    };

    ActionOutcome::applied(Action::Pet, Reply::Line(line))
}

fn wake(state: &mut PetState, now: DateTime<Utc>, config: &VitalsConfig) -> ActionOutcome {
    if !state.sleeping {
        return ActionOutcome::refused(Action::Wake, Reply::Silent);
    }
    personality::record_interaction(&mut state.care, state.fullness, state.bond, now, config);
    state.sleeping = false;
    state.happiness -= 10.0;
    ActionOutcome::applied(Action::Wake, Reply::Literal(WAKE_REPLY))
}
