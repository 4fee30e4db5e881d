//! Pure simulation logic for the moss creature.
//!
//! Everything here is a deterministic function of its inputs and an
//! explicit `now`. The actors in `moss-engine` own the state and call in.
//!
//! # Modules
//!
//! - [`actions`] -- Feed, play, pet and wake, with egg and cooldown gates.
//! - [`chat`] -- Dialogue log and the mystery state machine.
//! - [`clock`] -- [`Clock`] trait, stage-by-age, time of day.
//! - [`config`] -- [`VitalsConfig`] rates, thresholds and cooldowns.
//! - [`cooldown`] -- Stat-scaled cooldown arithmetic.
//! - [`fallback`] -- Built-in generic and per-personality message pools.
//! - [`mystery`] -- Static riddle and topic catalog.
//! - [`needs`] -- Most urgent need and the post-action grace window.
//! - [`personality`] -- Care metrics and personality derivation.
//! - [`pool`] -- Three-tier [`PoolSelector`].
//! - [`view`] -- [`PetView`](moss_types::PetView) projection.
//! - [`vitals`] -- Birth, lazy decay and mood.
//!
//! [`Clock`]: clock::Clock
//! [`VitalsConfig`]: config::VitalsConfig
//! [`PoolSelector`]: pool::PoolSelector

pub mod actions;
pub mod chat;
pub mod clock;
pub mod config;
pub mod cooldown;
pub mod fallback;
pub mod mystery;
pub mod needs;
pub mod personality;
pub mod pool;
pub mod view;
pub mod vitals;

pub use actions::{ActionOutcome, Reply};
pub use clock::{Clock, SystemClock};
pub use config::VitalsConfig;
pub use pool::{PoolSelector, Tier};
