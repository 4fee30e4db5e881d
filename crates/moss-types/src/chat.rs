//! Dialogue state owned by the Chat Actor and its query projections.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ChatRole, Track};
use crate::ids::MessageId;

/// One line of conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ChatMessage {
    /// Unique message id.
    pub id: MessageId,
    /// Who said it.
    pub role: ChatRole,
    /// Text content.
    pub content: String,
    /// When it was appended.
    pub timestamp: DateTime<Utc>,
}

/// A catalog entry for the mystery mini game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Mystery {
    /// Stable catalog id, unique within its track.
    pub id: String,
    /// Short display title.
    pub title: String,
    /// Opening narrative the creature presents.
    pub intro: String,
    /// Ordered hints. Empty for educational topics.
    pub hints: Vec<String>,
    /// Answer for riddles, or the key takeaway for educational topics.
    pub solution: String,
    /// Catalog track this entry belongs to.
    pub track: Track,
}

/// Complete dialogue state.
///
/// `mystery_progress` never exceeds the active mystery's hint count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ChatState {
    /// Conversation log, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Mystery in progress, if any.
    pub active_mystery: Option<Mystery>,
    /// Number of hints revealed for the active mystery.
    pub mystery_progress: usize,
    /// Hint texts revealed so far, in order.
    pub hints_given: Vec<String>,
    /// Ids of mysteries solved across the whole lifetime.
    pub solved: BTreeSet<String>,
    /// Set while a reply is being generated.
    pub is_typing: bool,
}

/// Identifying fields of a mystery, without the solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MysterySummary {
    /// Catalog id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Catalog track.
    pub track: Track,
}

impl From<&Mystery> for MysterySummary {
    fn from(mystery: &Mystery) -> Self {
        Self {
            id: mystery.id.clone(),
            title: mystery.title.clone(),
            track: mystery.track,
        }
    }
}

/// Answer to the mystery-status query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MysteryStatus {
    /// Whether a mystery is in progress.
    pub active: bool,
    /// The mystery in progress.
    pub mystery: Option<MysterySummary>,
    /// Hints revealed so far.
    pub progress: usize,
    /// Hint texts revealed so far.
    pub hints_given: Vec<String>,
    /// Total hints available for the mystery.
    pub total_hints: usize,
}

/// Answer to the chat-history query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ChatHistory {
    /// Conversation log, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Current mystery status.
    pub mystery_status: MysteryStatus,
    /// Set while a reply is being generated.
    pub is_typing: bool,
}
