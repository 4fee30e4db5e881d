//! Actor runtime for the moss creature.
//!
//! One creature is four actors: the pet (state owner), the need poller,
//! the pool regenerator and the chat. They share no memory. Signals go
//! through typed mailboxes, queries read published snapshots, and each
//! actor bounds its own history by continuing as a fresh instance.
//!
//! # Modules
//!
//! - [`actors`] -- The four actor loops.
//! - [`compose`] -- Composition root: mailboxes, launch table, [`Creature`].
//! - [`config`] -- `moss-config.yaml` loading.
//! - [`continuation`] -- History budgets and the instance host.
//! - [`error`] -- Engine error types.
//! - [`mailbox`] -- Typed addresses and inboxes.
//! - [`retry`] -- Exponential backoff.
//! - [`supervisor`] -- Dependency-ordered startup and graceful shutdown.
//!
//! [`Creature`]: compose::Creature

pub mod actors;
pub mod compose;
pub mod config;
pub mod continuation;
pub mod error;
pub mod mailbox;
pub mod retry;
pub mod supervisor;

pub use compose::{Creature, Seed, spawn};
pub use config::MossConfig;
pub use error::EngineError;
