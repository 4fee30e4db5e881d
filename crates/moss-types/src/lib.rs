//! Shared type definitions for the moss creature simulation.
//!
//! Every actor and the generation service speak in these types. They
//! flow to `TypeScript` via `ts-rs` for dashboard clients.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers
//! - [`enums`] -- Stage, mood, personality, actions, tracks
//! - [`pool`] -- Message categories and category-keyed pools
//! - [`state`] -- Creature state and its query projection
//! - [`chat`] -- Dialogue state, mysteries, chat query answers
//! - [`messages`] -- Per-actor signal enums
//! - [`generation`] -- Generation service request/response contract

pub mod chat;
pub mod enums;
pub mod generation;
pub mod ids;
pub mod messages;
pub mod pool;
pub mod state;

pub use chat::{ChatHistory, ChatMessage, ChatState, Mystery, MysteryStatus, MysterySummary};
pub use enums::{Action, ChatRole, Mood, Need, Personality, Stage, TimeOfDay, Track};
pub use generation::{
    ChatReply, ChatRequest, MysteryContext, MysteryUpdate, PetContext, PoolRequest,
};
pub use ids::{CreatureId, MessageId};
pub use messages::{ChatSignal, PetSignal, PoolSignal};
pub use pool::{Category, MessagePool};
pub use state::{CareMetrics, Cooldown, CooldownTimes, PetState, PetView};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Files land in `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::CreatureId::export_all();
        let _ = crate::ids::MessageId::export_all();

        let _ = crate::enums::Stage::export_all();
        let _ = crate::enums::Mood::export_all();
        let _ = crate::enums::TimeOfDay::export_all();
        let _ = crate::enums::Personality::export_all();
        let _ = crate::enums::Action::export_all();
        let _ = crate::enums::Need::export_all();
        let _ = crate::enums::Track::export_all();
        let _ = crate::enums::ChatRole::export_all();

        let _ = crate::pool::Category::export_all();
        let _ = crate::pool::MessagePool::export_all();

        let _ = crate::state::CareMetrics::export_all();
        let _ = crate::state::Cooldown::export_all();
        let _ = crate::state::CooldownTimes::export_all();
        let _ = crate::state::PetState::export_all();
        let _ = crate::state::PetView::export_all();

        let _ = crate::chat::ChatMessage::export_all();
        let _ = crate::chat::Mystery::export_all();
        let _ = crate::chat::ChatState::export_all();
        let _ = crate::chat::MysteryStatus::export_all();
        let _ = crate::chat::ChatHistory::export_all();

        let _ = crate::messages::PetSignal::export_all();
        let _ = crate::messages::ChatSignal::export_all();
        let _ = crate::messages::PoolSignal::export_all();

        let _ = crate::generation::PoolRequest::export_all();
        let _ = crate::generation::ChatRequest::export_all();
        let _ = crate::generation::ChatReply::export_all();
    }
}
