//! Enumeration types for the creature simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Life cycle
// ---------------------------------------------------------------------------

/// Life stage, derived from age since birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Stage {
    /// Freshly laid. Only bond decays; feeding and playing are refused.
    Egg,
    /// Hatched and small.
    Baby,
    /// Growing.
    Teen,
    /// Fully grown.
    Adult,
    /// Old age. Final stage.
    Elder,
}

impl Stage {
    /// Lowercase name as used in prompts and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Egg => "egg",
            Self::Baby => "baby",
            Self::Teen => "teen",
            Self::Adult => "adult",
            Self::Elder => "elder",
        }
    }
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority-classified mood of the creature.
///
/// Variants are listed in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Mood {
    /// Dormant: `hp` has reached zero and decay is frozen.
    Tun,
    /// Asleep.
    Sleeping,
    /// `hp` below 20.
    Critical,
    /// Fullness below 20.
    Hungry,
    /// Happiness below 20.
    Sad,
    /// Bond below 20.
    Lonely,
    /// Happiness above 70 and fullness above 50.
    Happy,
    /// None of the above.
    Neutral,
}

impl Mood {
    /// Lowercase name as used in prompts and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tun => "tun",
            Self::Sleeping => "sleeping",
            Self::Critical => "critical",
            Self::Hungry => "hungry",
            Self::Sad => "sad",
            Self::Lonely => "lonely",
            Self::Happy => "happy",
            Self::Neutral => "neutral",
        }
    }
}

impl core::fmt::Display for Mood {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse local time of day, used for the sleep rhythm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum TimeOfDay {
    /// 05:00 to 08:00. The creature wakes up on its own.
    Dawn,
    /// 08:00 to 18:00.
    Day,
    /// 18:00 to 22:00.
    Dusk,
    /// 22:00 to 05:00. The creature falls asleep.
    Night,
}

/// Temperament derived from care history and bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Personality {
    /// Well cared for and closely bonded.
    Cheerful,
    /// Neglected but still somewhat attached.
    Dramatic,
    /// Neglected and weakly bonded.
    Sassy,
    /// Barely known, or never interacted with.
    Shy,
    /// Steady middle ground.
    Stoic,
}

impl Personality {
    /// Every personality, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Cheerful,
        Self::Dramatic,
        Self::Sassy,
        Self::Shy,
        Self::Stoic,
    ];

    /// Lowercase name as used in prompts and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cheerful => "cheerful",
            Self::Dramatic => "dramatic",
            Self::Sassy => "sassy",
            Self::Shy => "shy",
            Self::Stoic => "stoic",
        }
    }
}

impl core::fmt::Display for Personality {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Care
// ---------------------------------------------------------------------------

/// A user-initiated care action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Action {
    /// Give food.
    Feed,
    /// Play a game.
    Play,
    /// Pet the creature.
    Pet,
    /// Wake a sleeping creature.
    Wake,
}

impl Action {
    /// Lowercase name as used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Pet => "pet",
            Self::Wake => "wake",
        }
    }
}

/// The most urgent unmet need, as seen by the need poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Need {
    /// `hp` is low enough to be worrying.
    Critical,
    /// Fullness is the lowest stat under threshold.
    Food,
    /// Happiness is the lowest stat under threshold.
    Play,
    /// Bond is the lowest stat under threshold.
    Affection,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Mystery catalog track.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Track {
    /// Riddles with hints and a hidden solution.
    #[default]
    Fun,
    /// Concept explanations. Solved once the creature has taught the topic.
    Educational,
}

impl Track {
    /// Lowercase name as used in prompts and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fun => "fun",
            Self::Educational => "educational",
        }
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ChatRole {
    /// The human.
    User,
    /// The creature.
    Assistant,
}

impl ChatRole {
    /// Lowercase name as used in prompts.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_lowercase() {
        let json = serde_json::to_string(&Stage::Egg).unwrap_or_default();
        assert_eq!(json, "\"egg\"");
        let json = serde_json::to_string(&Track::Educational).unwrap_or_default();
        assert_eq!(json, "\"educational\"");
    }

    #[test]
    fn track_defaults_to_fun() {
        assert_eq!(Track::default(), Track::Fun);
    }

    #[test]
    fn display_matches_serialized_name() {
        for personality in Personality::ALL {
            let json = serde_json::to_string(&personality).unwrap_or_default();
            assert_eq!(json, format!("\"{personality}\""));
        }
    }
}
