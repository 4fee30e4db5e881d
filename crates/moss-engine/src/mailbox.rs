//! Typed actor addresses.
//!
//! An address pairs the sending half of an actor's signal mailbox with a
//! read-only view of the snapshot the actor publishes after every event.
//! Signals queue in arrival order; queries read the latest snapshot and
//! never wait on the actor's event loop.

use chrono::{DateTime, Utc};
use moss_sim::VitalsConfig;
use moss_types::{
    Action, ChatHistory, ChatSignal, ChatState, MysteryStatus, PetSignal, PetState, PetView,
    PoolSignal, Track,
};
use tokio::sync::{mpsc, watch};

use crate::error::{QueryError, SignalError};
use crate::supervisor::ActorKind;

/// Handle for signalling and querying one actor.
#[derive(Debug)]
pub struct Address<S, T> {
    actor: ActorKind,
    signals: mpsc::UnboundedSender<S>,
    snapshot: watch::Receiver<T>,
}

impl<S, T> Clone for Address<S, T> {
    fn clone(&self) -> Self {
        Self {
            actor: self.actor,
            signals: self.signals.clone(),
            snapshot: self.snapshot.clone(),
        }
    }
}

/// The actor-side half of an [`Address`].
#[derive(Debug)]
pub struct Inbox<S, T> {
    signals: mpsc::UnboundedReceiver<S>,
    snapshot: watch::Sender<T>,
}

/// Create a connected address and inbox, seeded with `initial`.
pub fn mailbox<S, T>(actor: ActorKind, initial: T) -> (Address<S, T>, Inbox<S, T>) {
    let (signal_tx, signal_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(initial);
    (
        Address {
            actor,
            signals: signal_tx,
            snapshot: snapshot_rx,
        },
        Inbox {
            signals: signal_rx,
            snapshot: snapshot_tx,
        },
    )
}

impl<S, T: Clone> Address<S, T> {
    /// The actor this address points at.
    pub const fn actor(&self) -> ActorKind {
        self.actor
    }

    /// Queue a signal.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Closed`] if the actor has stopped for good.
    pub fn signal(&self, signal: S) -> Result<(), SignalError> {
        self.signals
            .send(signal)
            .map_err(|_closed| SignalError::Closed { actor: self.actor })
    }

    /// The latest published snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Unavailable`] once the actor has stopped
    /// publishing.
    pub fn snapshot(&self) -> Result<T, QueryError> {
        if self.snapshot.has_changed().is_err() {
            return Err(QueryError::Unavailable { actor: self.actor });
        }
        Ok(self.snapshot.borrow().clone())
    }

    /// Wait until a published snapshot satisfies `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Unavailable`] if the actor stops first.
    pub async fn wait_for(&self, mut predicate: impl FnMut(&T) -> bool) -> Result<T, QueryError> {
        let mut rx = self.snapshot.clone();
        rx.wait_for(|value| predicate(value))
            .await
            .map(|value| value.clone())
            .map_err(|_closed| QueryError::Unavailable { actor: self.actor })
    }
}

impl<S, T> Inbox<S, T> {
    /// Next queued signal, or `None` when every address is gone.
    pub async fn recv(&mut self) -> Option<S> {
        self.signals.recv().await
    }

    /// Replace the published snapshot.
    pub fn publish(&self, value: T) {
        self.snapshot.send_replace(value);
    }
}

/// Address of the pet actor.
pub type PetAddress = Address<PetSignal, PetState>;

/// Address of the chat actor.
pub type ChatAddress = Address<ChatSignal, ChatState>;

/// Counters published by the pool regenerator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStatus {
    /// Pools generated and delivered to the pet.
    pub generated: u64,
    /// Generation requests that failed after every retry.
    pub failed: u64,
    /// When the last pool was delivered.
    pub last_generated_at: Option<DateTime<Utc>>,
}

/// Address of the pool regenerator.
pub type PoolAddress = Address<PoolSignal, PoolStatus>;

impl PetAddress {
    /// Ask the creature to perform a care action.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Closed`] if the pet has stopped.
    pub fn act(&self, action: Action) -> Result<(), SignalError> {
        self.signal(PetSignal::from(action))
    }

    /// The stored state, as of the last handled event.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Unavailable`] if the pet has stopped.
    pub fn state(&self) -> Result<PetState, QueryError> {
        self.snapshot()
    }

    /// Presentation of the state brought up to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Unavailable`] if the pet has stopped.
    pub fn view(&self, now: DateTime<Utc>, config: &VitalsConfig) -> Result<PetView, QueryError> {
        let state = self.snapshot()?;
        Ok(moss_sim::view::view(&state, now, config))
    }
}

impl ChatAddress {
    /// Send a user chat line.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Closed`] if the chat has stopped.
    pub fn send_message(&self, content: impl Into<String>) -> Result<(), SignalError> {
        self.signal(ChatSignal::SendMessage {
            content: content.into(),
        })
    }

    /// Begin a mystery from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Closed`] if the chat has stopped.
    pub fn start_mystery(
        &self,
        mystery_id: impl Into<String>,
        track: Option<Track>,
    ) -> Result<(), SignalError> {
        self.signal(ChatSignal::StartMystery {
            mystery_id: mystery_id.into(),
            track,
        })
    }

    /// Messages, mystery status and typing flag.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Unavailable`] if the chat has stopped.
    pub fn history(&self) -> Result<ChatHistory, QueryError> {
        Ok(moss_sim::chat::history(&self.snapshot()?))
    }

    /// Status of the active mystery.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Unavailable`] if the chat has stopped.
    pub fn mystery_status(&self) -> Result<MysteryStatus, QueryError> {
        Ok(moss_sim::chat::mystery_status(&self.snapshot()?))
    }
}
