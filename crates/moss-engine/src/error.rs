//! Error types for the engine.
//!
//! [`EngineError`] is the top-level error that `main` propagates. The
//! narrower types describe failures at the actor seams: talking to a
//! sibling ([`QueryError`], [`SignalError`]) and managing the set of
//! actors ([`SupervisorError`]).

use crate::config::ConfigError;
use crate::supervisor::ActorKind;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Starting or stopping the actors failed.
    #[error("supervisor error: {source}")]
    Supervisor {
        /// The underlying supervisor error.
        #[from]
        source: SupervisorError,
    },

    /// Waiting for the shutdown signal failed.
    #[error("signal handler error: {source}")]
    Signal {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// Failures while starting or stopping actors.
#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    /// The dependency graph has a cycle.
    #[error("dependency cycle among actors: {actors:?}")]
    DependencyCycle {
        /// Actors left unordered when the cycle was found.
        actors: Vec<ActorKind>,
    },

    /// An actor depends on one that is not registered.
    #[error("{actor} depends on {missing}, which is not registered")]
    MissingDependency {
        /// The dependent actor.
        actor: ActorKind,
        /// The absent dependency.
        missing: ActorKind,
    },

    /// The same actor was registered twice.
    #[error("{actor} is registered more than once")]
    Duplicate {
        /// The repeated actor.
        actor: ActorKind,
    },

    /// An actor stopped before reporting ready.
    #[error("{actor} stopped before it was ready")]
    NotReady {
        /// The actor that never became ready.
        actor: ActorKind,
    },

    /// An actor task panicked or was cancelled.
    #[error("{actor} task failed: {message}")]
    TaskFailed {
        /// The failed actor.
        actor: ActorKind,
        /// Join error description.
        message: String,
    },
}

/// A query against a sibling actor failed.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The actor has stopped and no longer publishes its state.
    #[error("{actor} is unavailable")]
    Unavailable {
        /// The queried actor.
        actor: ActorKind,
    },
}

/// A signal could not be delivered.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// The actor's mailbox is closed.
    #[error("{actor} mailbox is closed")]
    Closed {
        /// The target actor.
        actor: ActorKind,
    },
}
