//! Closed signal sets, one enum per actor.
//!
//! Every cross-actor message is a variant of exactly one of these enums,
//! so routing is checked at compile time and each payload has a fixed
//! schema. Serialized with a `type` tag in kebab-case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Action, Personality, Stage, Track};
use crate::pool::MessagePool;

/// Signals accepted by the Pet Actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum PetSignal {
    /// Feed the creature.
    Feed,
    /// Play with the creature.
    Play,
    /// Pet the creature.
    Pet,
    /// Wake the creature.
    Wake,
    /// Coaxing line and/or personality observed by the need poller.
    UpdateNeedMessage {
        /// Line to show, if a need was found.
        message: Option<String>,
        /// Personality the poller derived.
        personality: Option<Personality>,
    },
    /// Outcome of a pool generation.
    PoolResult {
        /// The generated pool. `None` keeps the static fallbacks.
        pool: Option<MessagePool>,
        /// When the pool was produced.
        generated_at: DateTime<Utc>,
    },
}

impl PetSignal {
    /// The care action carried by this signal, if any.
    pub const fn action(&self) -> Option<Action> {
        match self {
            Self::Feed => Some(Action::Feed),
            Self::Play => Some(Action::Play),
            Self::Pet => Some(Action::Pet),
            Self::Wake => Some(Action::Wake),
            Self::UpdateNeedMessage { .. } | Self::PoolResult { .. } => None,
        }
    }

    /// Short name for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Pet => "pet",
            Self::Wake => "wake",
            Self::UpdateNeedMessage { .. } => "update-need-message",
            Self::PoolResult { .. } => "pool-result",
        }
    }
}

impl From<Action> for PetSignal {
    fn from(action: Action) -> Self {
        match action {
            Action::Feed => Self::Feed,
            Action::Play => Self::Play,
            Action::Pet => Self::Pet,
            Action::Wake => Self::Wake,
        }
    }
}

/// Signals accepted by the Chat Actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum ChatSignal {
    /// A user chat line.
    SendMessage {
        /// Text typed by the user.
        content: String,
    },
    /// Begin a mystery from the catalog.
    StartMystery {
        /// Catalog id.
        mystery_id: String,
        /// Catalog track. Defaults to the configured track.
        track: Option<Track>,
    },
}

/// Signals accepted by the `PoolRegenerator` Actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum PoolSignal {
    /// Generate a fresh pool for this persona.
    PoolRegenerate {
        /// Personality to write for.
        personality: Personality,
        /// Life stage to write for.
        stage: Stage,
        /// Bond at trigger time.
        bond: f64,
    },
}
