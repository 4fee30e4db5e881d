//! The four actors of one creature.
//!
//! Each actor is a [`Continuable`](crate::continuation::Continuable):
//! a `select!` loop over shutdown, its mailbox and its timer that handles
//! one event to completion before taking the next.

pub mod chat;
pub mod need_updater;
pub mod pet;
pub mod pool_regenerator;

pub use chat::ChatActor;
pub use need_updater::NeedUpdater;
pub use pet::PetActor;
pub use pool_regenerator::PoolRegenerator;
