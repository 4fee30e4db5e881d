//! Starting and stopping the actor set.
//!
//! Each actor declares the siblings it queries. [`Supervisor::start`]
//! launches actors in dependency order and waits for each to report
//! ready before launching its dependents. [`Supervisor::shutdown`] raises
//! a shared flag; every actor finishes its in-flight event and exits, and
//! the supervisor joins them in reverse start order.
//!
//! Signals never need ordering: mailboxes exist before any actor runs
//! and buffer until their owner starts.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::SupervisorError;

/// The four actors that make up one creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActorKind {
    /// Owns the creature's state.
    Pet,
    /// Polls the pet for unmet needs.
    NeedUpdater,
    /// Requests message pools from the generation service.
    PoolRegenerator,
    /// Runs the dialogue and mysteries.
    Chat,
}

impl ActorKind {
    /// Kebab-case name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pet => "pet",
            Self::NeedUpdater => "need-updater",
            Self::PoolRegenerator => "pool-regenerator",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An actor and the siblings it must find running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSpec {
    /// The actor.
    pub kind: ActorKind,
    /// Actors that must be ready first.
    pub depends_on: Vec<ActorKind>,
}

impl ActorSpec {
    /// Spec for `kind` with the given dependencies.
    pub fn new(kind: ActorKind, depends_on: impl IntoIterator<Item = ActorKind>) -> Self {
        Self {
            kind,
            depends_on: depends_on.into_iter().collect(),
        }
    }
}

/// Order actors so that every dependency starts before its dependents.
///
/// Ties are broken by [`ActorKind`] order, so the result is stable.
///
/// # Errors
///
/// Returns [`SupervisorError::Duplicate`], [`SupervisorError::MissingDependency`]
/// or [`SupervisorError::DependencyCycle`] for a malformed graph.
pub fn startup_order(specs: &[ActorSpec]) -> Result<Vec<ActorKind>, SupervisorError> {
    let mut in_degree: BTreeMap<ActorKind, usize> = BTreeMap::new();
    for spec in specs {
        if in_degree.insert(spec.kind, 0).is_some() {
            return Err(SupervisorError::Duplicate { actor: spec.kind });
        }
    }

    let mut dependents: BTreeMap<ActorKind, Vec<ActorKind>> = BTreeMap::new();
    for spec in specs {
        let unique: BTreeSet<ActorKind> = spec.depends_on.iter().copied().collect();
        for dependency in unique {
            if !in_degree.contains_key(&dependency) {
                return Err(SupervisorError::MissingDependency {
                    actor: spec.kind,
                    missing: dependency,
                });
            }
            dependents.entry(dependency).or_default().push(spec.kind);
            if let Some(degree) = in_degree.get_mut(&spec.kind) {
                *degree = degree.saturating_add(1);
            }
        }
    }

    let mut ready: VecDeque<ActorKind> = in_degree
        .iter()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(&kind, _)| kind)
        .collect();
    let mut order = Vec::with_capacity(specs.len());

    while let Some(kind) = ready.pop_front() {
        order.push(kind);
        let mut unblocked = Vec::new();
        for dependent in dependents.get(&kind).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(dependent) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    unblocked.push(*dependent);
                }
            }
        }
        unblocked.sort_unstable();
        ready.extend(unblocked);
    }

    if order.len() < in_degree.len() {
        let actors = in_degree
            .into_iter()
            .filter(|(kind, _)| !order.contains(kind))
            .map(|(kind, _)| kind)
            .collect();
        return Err(SupervisorError::DependencyCycle { actors });
    }
    Ok(order)
}

/// An actor's view of the shared shutdown flag.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// Whether shutdown has been requested.
    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown is requested or the supervisor is gone.
    ///
    /// Cancel-safe, so it can sit in a `select!` arm.
    pub async fn requested(&mut self) {
        while !*self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// What the supervisor hands an actor at launch.
#[derive(Debug)]
pub struct ActorContext {
    /// The shared shutdown flag.
    pub shutdown: Shutdown,
    ready: Option<oneshot::Sender<()>>,
}

impl ActorContext {
    /// Report that the actor is serving queries. Later calls do nothing.
    pub fn mark_ready(&mut self) {
        if let Some(tx) = self.ready.take()
            && tx.send(()).is_err()
        {
            warn!("supervisor stopped waiting for readiness");
        }
    }
}

/// Spawns one actor task given its context.
pub type Launch = Box<dyn FnOnce(ActorContext) -> JoinHandle<()> + Send>;

/// Owns the running actor tasks.
#[derive(Debug)]
pub struct Supervisor {
    shutdown_tx: watch::Sender<bool>,
    running: Vec<(ActorKind, JoinHandle<()>)>,
}

impl Supervisor {
    /// A shutdown flag not yet attached to any actor.
    pub fn shutdown_channel() -> (watch::Sender<bool>, Shutdown) {
        let (tx, rx) = watch::channel(false);
        (tx, Shutdown { rx })
    }

    /// Launch every actor in dependency order.
    ///
    /// Each launch waits for the previous actor's readiness. If any actor
    /// fails to become ready, the ones already running are shut down.
    ///
    /// # Errors
    ///
    /// Returns the graph error from [`startup_order`], or
    /// [`SupervisorError::NotReady`].
    pub async fn start(
        actors: Vec<(ActorSpec, Launch)>,
    ) -> Result<Self, SupervisorError> {
        let specs: Vec<ActorSpec> = actors.iter().map(|(spec, _)| spec.clone()).collect();
        let order = startup_order(&specs)?;

        let mut launches: BTreeMap<ActorKind, Launch> = actors
            .into_iter()
            .map(|(spec, launch)| (spec.kind, launch))
            .collect();
        let (shutdown_tx, shutdown) = Self::shutdown_channel();
        let mut supervisor = Self {
            shutdown_tx,
            running: Vec::with_capacity(order.len()),
        };

        for kind in order {
            let Some(launch) = launches.remove(&kind) else {
                continue;
            };
            let (ready_tx, ready_rx) = oneshot::channel();
            let context = ActorContext {
                shutdown: shutdown.clone(),
                ready: Some(ready_tx),
            };
            supervisor.running.push((kind, launch(context)));

            if ready_rx.await.is_err() {
                warn!(actor = %kind, "actor stopped before ready, aborting startup");
                if let Err(e) = supervisor.shutdown().await {
                    warn!(error = %e, "cleanup after failed startup");
                }
                return Err(SupervisorError::NotReady { actor: kind });
            }
            info!(actor = %kind, "actor ready");
        }
        Ok(supervisor)
    }

    /// Actors in the order they were started.
    pub fn running(&self) -> Vec<ActorKind> {
        self.running.iter().map(|(kind, _)| *kind).collect()
    }

    /// Request shutdown and wait for every actor to exit.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::TaskFailed`] for the first actor whose
    /// task panicked. The remaining actors are still joined.
    pub async fn shutdown(mut self) -> Result<(), SupervisorError> {
        self.shutdown_tx.send_replace(true);
        let mut first_error = None;
        while let Some((kind, handle)) = self.running.pop() {
            match handle.await {
                Ok(()) => info!(actor = %kind, "actor stopped"),
                Err(e) => {
                    warn!(actor = %kind, error = %e, "actor task failed");
                    first_error.get_or_insert(SupervisorError::TaskFailed {
                        actor: kind,
                        message: e.to_string(),
                    });
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
