//! Message categories and category-keyed message pools.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Mood, Need};

/// Closed set of flavor-text categories.
///
/// Serialized in camelCase (`feedSuccess`, `idleTun`, `needsFood`), which
/// is also the key format expected from the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum Category {
    /// Ordinary successful feeding.
    FeedSuccess,
    /// Fed while already stuffed.
    FeedFull,
    /// Fed while very hungry.
    FeedHungry,
    /// Fed while asleep.
    FeedSleeping,
    /// Fed while dormant.
    FeedTun,
    /// Feed refused by cooldown.
    FeedCooldown,
    /// Ordinary play.
    PlaySuccess,
    /// Play while too tired or weak.
    PlayTired,
    /// Play that leaves the creature happy.
    PlayHappy,
    /// Play attempted while asleep.
    PlaySleeping,
    /// Play attempted while dormant.
    PlayTun,
    /// Play refused by cooldown.
    PlayCooldown,
    /// Ordinary petting.
    PetSuccess,
    /// Petting at maximum bond.
    PetMaxBond,
    /// Petting while sad or hungry.
    PetLowMood,
    /// Petting while asleep.
    PetSleeping,
    /// Petting while dormant.
    PetTun,
    /// Pet refused by cooldown.
    PetCooldown,
    /// Recovered out of dormancy.
    Reviving,
    /// Idle chatter when happy.
    IdleHappy,
    /// Idle chatter when neutral.
    IdleNeutral,
    /// Idle chatter when hungry.
    IdleHungry,
    /// Idle chatter when sad.
    IdleSad,
    /// Idle chatter when lonely.
    IdleLonely,
    /// Idle chatter when critical.
    IdleCritical,
    /// Idle chatter while dormant.
    IdleTun,
    /// Idle chatter while asleep.
    IdleSleeping,
    /// Coaxing for food.
    NeedsFood,
    /// Coaxing for play.
    NeedsPlay,
    /// Coaxing for affection.
    NeedsAffection,
    /// Coaxing when `hp` is low.
    NeedsCritical,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 31] = [
        Self::FeedSuccess,
        Self::FeedFull,
        Self::FeedHungry,
        Self::FeedSleeping,
        Self::FeedTun,
        Self::FeedCooldown,
        Self::PlaySuccess,
        Self::PlayTired,
        Self::PlayHappy,
        Self::PlaySleeping,
        Self::PlayTun,
        Self::PlayCooldown,
        Self::PetSuccess,
        Self::PetMaxBond,
        Self::PetLowMood,
        Self::PetSleeping,
        Self::PetTun,
        Self::PetCooldown,
        Self::Reviving,
        Self::IdleHappy,
        Self::IdleNeutral,
        Self::IdleHungry,
        Self::IdleSad,
        Self::IdleLonely,
        Self::IdleCritical,
        Self::IdleTun,
        Self::IdleSleeping,
        Self::NeedsFood,
        Self::NeedsPlay,
        Self::NeedsAffection,
        Self::NeedsCritical,
    ];

    /// The four coaxing categories.
    pub const NEEDS: [Self; 4] = [
        Self::NeedsFood,
        Self::NeedsPlay,
        Self::NeedsAffection,
        Self::NeedsCritical,
    ];

    /// camelCase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FeedSuccess => "feedSuccess",
            Self::FeedFull => "feedFull",
            Self::FeedHungry => "feedHungry",
            Self::FeedSleeping => "feedSleeping",
            Self::FeedTun => "feedTun",
            Self::FeedCooldown => "feedCooldown",
            Self::PlaySuccess => "playSuccess",
            Self::PlayTired => "playTired",
            Self::PlayHappy => "playHappy",
            Self::PlaySleeping => "playSleeping",
            Self::PlayTun => "playTun",
            Self::PlayCooldown => "playCooldown",
            Self::PetSuccess => "petSuccess",
            Self::PetMaxBond => "petMaxBond",
            Self::PetLowMood => "petLowMood",
            Self::PetSleeping => "petSleeping",
            Self::PetTun => "petTun",
            Self::PetCooldown => "petCooldown",
            Self::Reviving => "reviving",
            Self::IdleHappy => "idleHappy",
            Self::IdleNeutral => "idleNeutral",
            Self::IdleHungry => "idleHungry",
            Self::IdleSad => "idleSad",
            Self::IdleLonely => "idleLonely",
            Self::IdleCritical => "idleCritical",
            Self::IdleTun => "idleTun",
            Self::IdleSleeping => "idleSleeping",
            Self::NeedsFood => "needsFood",
            Self::NeedsPlay => "needsPlay",
            Self::NeedsAffection => "needsAffection",
            Self::NeedsCritical => "needsCritical",
        }
    }

    /// Look up a category by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Idle chatter category for a mood.
    pub const fn idle(mood: Mood) -> Self {
        match mood {
            Mood::Tun => Self::IdleTun,
            Mood::Sleeping => Self::IdleSleeping,
            Mood::Critical => Self::IdleCritical,
            Mood::Hungry => Self::IdleHungry,
            Mood::Sad => Self::IdleSad,
            Mood::Lonely => Self::IdleLonely,
            Mood::Happy => Self::IdleHappy,
            Mood::Neutral => Self::IdleNeutral,
        }
    }

    /// Coaxing category for a need.
    pub const fn for_need(need: Need) -> Self {
        match need {
            Need::Critical => Self::NeedsCritical,
            Need::Food => Self::NeedsFood,
            Need::Play => Self::NeedsPlay,
            Need::Affection => Self::NeedsAffection,
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category-keyed lists of candidate lines.
///
/// Serializes as a plain JSON object, e.g. `{"feedSuccess": ["..."]}`.
/// A category may be missing or map to an empty list; both count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MessagePool(pub BTreeMap<Category, Vec<String>>);

impl MessagePool {
    /// Create an empty pool.
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Lines for a category, or `None` if missing or empty.
    pub fn get(&self, category: Category) -> Option<&[String]> {
        self.0
            .get(&category)
            .map(Vec::as_slice)
            .filter(|lines| !lines.is_empty())
    }

    /// Replace the lines for a category.
    pub fn insert(&mut self, category: Category, lines: Vec<String>) {
        self.0.insert(category, lines);
    }

    /// Number of categories with at least one line.
    pub fn covered(&self) -> usize {
        self.0.values().filter(|lines| !lines.is_empty()).count()
    }

    /// True when no category has any line.
    pub fn is_empty(&self) -> bool {
        self.covered() == 0
    }
}

impl FromIterator<(Category, Vec<String>)> for MessagePool {
    fn from_iter<I: IntoIterator<Item = (Category, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
