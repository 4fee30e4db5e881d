//! The chat actor.
//!
//! Owns the conversation and the mystery session. Each user message is
//! answered by one generation call that sees the recent history, the
//! creature's persona and, when a mystery is running, its progress. A
//! failed call falls back to a canned line keyed by mood and leaves the
//! mystery untouched.

use std::sync::Arc;

use moss_generator::GenerationService;
use moss_sim::personality::bond_description;
use moss_sim::{Clock, chat, mystery, vitals};
use moss_types::{ChatRequest, ChatRole, ChatSignal, ChatState, Mood, PetContext, Track};
use tracing::{debug, info, warn};

use crate::config::MossConfig;
use crate::continuation::{Continuable, Exit};
use crate::mailbox::{Inbox, PetAddress};
use crate::retry::with_backoff;
use crate::supervisor::{ActorContext, ActorKind};

/// The chat actor.
pub struct ChatActor<G> {
    clock: Arc<dyn Clock>,
    config: Arc<MossConfig>,
    generator: Arc<G>,
    inbox: Inbox<ChatSignal, ChatState>,
    pet: PetAddress,
    context: ActorContext,
}

impl<G: GenerationService> ChatActor<G> {
    /// Assemble the chat actor.
    pub fn new(
        clock: Arc<dyn Clock>,
        config: Arc<MossConfig>,
        generator: Arc<G>,
        inbox: Inbox<ChatSignal, ChatState>,
        pet: PetAddress,
        context: ActorContext,
    ) -> Self {
        Self {
            clock,
            config,
            generator,
            inbox,
            pet,
            context,
        }
    }

    async fn handle(&self, state: &mut ChatState, signal: ChatSignal) {
        match signal {
            ChatSignal::SendMessage { content } => self.answer(state, content).await,
            ChatSignal::StartMystery { mystery_id, track } => {
                self.start(state, &mystery_id, track);
            }
        }
    }

    fn start(&self, state: &mut ChatState, mystery_id: &str, track: Option<Track>) {
        let track = track.unwrap_or(self.config.creature.default_track);
        match mystery::find(mystery_id, track) {
            Some(found) => {
                chat::start_mystery(state, found, self.clock.now());
                info!(mystery = mystery_id, track = track.as_str(), "mystery started");
            }
            None => warn!(
                mystery = mystery_id,
                track = track.as_str(),
                "unknown mystery, ignored"
            ),
        }
    }

    /// Track the current exchange belongs to.
    fn track(&self, state: &ChatState) -> Track {
        state
            .active_mystery
            .as_ref()
            .map_or(self.config.creature.default_track, |m| m.track)
    }

    async fn answer(&self, state: &mut ChatState, content: String) {
        if content.trim().is_empty() {
            debug!("blank chat message ignored");
            return;
        }
        chat::push_message(state, ChatRole::User, content, self.clock.now());

        let track = self.track(state);
        let searching = track == Track::Educational && state.active_mystery.is_some();
        let placeholder = searching.then(|| {
            chat::push_message(
                state,
                ChatRole::Assistant,
                chat::SEARCHING_PLACEHOLDER,
                self.clock.now(),
            )
        });
        state.is_typing = true;
        self.inbox.publish(state.clone());

        let (pet, mood) = self.pet_context().await.unzip();
        let keep = self.config.timing.chat_context_messages;
        let history: Vec<_> = state
            .messages
            .iter()
            .filter(|m| Some(m.id) != placeholder)
            .cloned()
            .collect();
        let skip = history.len().saturating_sub(keep);
        let request = ChatRequest {
            messages: history.into_iter().skip(skip).collect(),
            pet,
            mystery: chat::mystery_context(state),
            track,
        };

        let generator = &self.generator;
        let request_ref = &request;
        let reply = with_backoff(&self.config.retry.generation, "generate-chat", move || {
            generator.generate_chat(request_ref)
        })
        .await;

        let text = match reply {
            Ok(reply) => chat::apply_reply(state, &reply),
            Err(e) => {
                warn!(error = %e, "chat generation failed, using canned reply");
                chat::fallback_reply(mood).to_owned()
            }
        };
        let now = self.clock.now();
        match placeholder {
            Some(id) => chat::replace_message(state, id, ChatRole::Assistant, text, now),
            None => chat::push_message(state, ChatRole::Assistant, text, now),
        };
        state.is_typing = false;
        debug!(messages = state.messages.len(), "reply delivered");
    }

    /// Persona for the prompt plus the mood for canned replies.
    async fn pet_context(&self) -> Option<(PetContext, Mood)> {
        let pet = &self.pet;
        let stored = match with_backoff(&self.config.retry.query, "pet-state", move || async move {
            pet.state()
        })
        .await
        {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "pet unavailable, chatting without persona");
                return None;
            }
        };
        let current = vitals::current_state(&stored, self.clock.now(), &self.config.vitals);
        let mood = vitals::mood(&current);
        Some((
            PetContext {
                personality: current.personality,
                mood,
                stage: current.stage,
                bond: current.bond,
                bond_description: bond_description(current.bond).to_owned(),
            },
            mood,
        ))
    }
}

impl<G: GenerationService> Continuable for ChatActor<G> {
    type Carry = ChatState;
    const KIND: ActorKind = ActorKind::Chat;

    async fn run_instance(&mut self, carry: ChatState) -> Exit<ChatState> {
        let mut state = carry;
        self.inbox.publish(state.clone());
        self.context.mark_ready();
        info!(
            messages = state.messages.len(),
            solved = state.solved.len(),
            "chat running"
        );

        loop {
            tokio::select! {
                biased;
                () = self.context.shutdown.requested() => return Exit::Shutdown,
                signal = self.inbox.recv() => match signal {
                    Some(signal) => self.handle(&mut state, signal).await,
                    None => return Exit::Shutdown,
                },
            }
            self.inbox.publish(state.clone());

            let limits = &self.config.continuation;
            if state.messages.len() >= limits.chat_messages {
                return Exit::Continue(chat::carry_over(&state, limits.chat_keep));
            }
        }
    }
}
