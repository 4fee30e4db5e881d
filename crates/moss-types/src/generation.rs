//! Request and response shapes for the external text-generation service.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::chat::ChatMessage;
use crate::enums::{Mood, Personality, Stage, Track};

/// Ask for a fresh message pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PoolRequest {
    /// Personality the lines should express.
    pub personality: Personality,
    /// Life stage the lines should fit.
    pub stage: Stage,
    /// Human-readable bond level, e.g. "close companions".
    pub bond_description: String,
}

/// Creature context attached to a chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PetContext {
    /// Current personality.
    pub personality: Personality,
    /// Current mood.
    pub mood: Mood,
    /// Current life stage.
    pub stage: Stage,
    /// Bond value.
    pub bond: f64,
    /// Human-readable bond level.
    pub bond_description: String,
}

/// Mystery context attached to a chat request while a mystery is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MysteryContext {
    /// Display title.
    pub title: String,
    /// Opening narrative.
    pub intro: String,
    /// Hints already revealed.
    pub hints_given: Vec<String>,
    /// The next unrevealed hint, if any remain.
    pub next_hint: Option<String>,
    /// Hints revealed so far.
    pub progress: usize,
    /// Total hints available.
    pub total_hints: usize,
    /// Answer or key takeaway, for judging guesses.
    pub solution: String,
}

/// Ask for a chat reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ChatRequest {
    /// Conversation so far, ending with the user's newest line.
    pub messages: Vec<ChatMessage>,
    /// Creature context. `None` when the Pet Actor could not be reached.
    pub pet: Option<PetContext>,
    /// Active mystery, if any.
    pub mystery: Option<MysteryContext>,
    /// Track the reply is written for.
    pub track: Track,
}

/// Structured change to the mystery session carried by a reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MysteryUpdate {
    /// The user's answer was correct.
    pub solved: bool,
    /// The session should end unsolved.
    pub failed: bool,
    /// Hint revealed in this reply.
    pub hint_given: Option<String>,
}

/// A generated chat reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ChatReply {
    /// Text to show as the creature's line.
    pub response: String,
    /// Mystery state change, if any.
    #[serde(default)]
    pub mystery_update: Option<MysteryUpdate>,
}
