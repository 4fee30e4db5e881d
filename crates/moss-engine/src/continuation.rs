//! Bounded-history actor instances.
//!
//! An actor runs as a sequence of instances. Each instance counts the
//! events it handles against a [`HistoryBudget`]; when the budget is
//! spent it returns [`Exit::Continue`] with the state worth keeping, and
//! [`host`] starts a fresh instance from that carry. The mailbox and
//! published snapshot belong to the actor, not the instance, so senders
//! and queriers never notice the handover.

use std::future::Future;

use tracing::{debug, info};

use crate::supervisor::ActorKind;

/// How an instance ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit<C> {
    /// History bound reached; start again from this carry.
    Continue(C),
    /// Shutdown was requested.
    Shutdown,
}

/// Counts handled events against a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryBudget {
    limit: u64,
    used: u64,
}

impl HistoryBudget {
    /// A budget of `limit` events. Zero is treated as one.
    pub const fn new(limit: u64) -> Self {
        Self {
            limit: if limit == 0 { 1 } else { limit },
            used: 0,
        }
    }

    /// Record one handled event.
    pub const fn record(&mut self) {
        self.used = self.used.saturating_add(1);
    }

    /// Events recorded so far.
    pub const fn used(&self) -> u64 {
        self.used
    }

    /// Whether the instance should hand over.
    pub const fn exhausted(&self) -> bool {
        self.used >= self.limit
    }
}

/// An actor that runs as a chain of bounded instances.
pub trait Continuable: Send {
    /// State passed from one instance to the next.
    type Carry: Send;

    /// Which actor this is, for logs.
    const KIND: ActorKind;

    /// Run one instance until its budget is spent or shutdown.
    fn run_instance(
        &mut self,
        carry: Self::Carry,
    ) -> impl Future<Output = Exit<Self::Carry>> + Send;
}

/// Drive `actor` from `initial` until shutdown.
pub async fn host<A: Continuable>(mut actor: A, initial: A::Carry) {
    let mut carry = initial;
    let mut instance = 1_u32;
    loop {
        debug!(actor = %A::KIND, instance, "instance starting");
        match actor.run_instance(carry).await {
            Exit::Continue(next) => {
                instance = instance.saturating_add(1);
                info!(actor = %A::KIND, instance, "history bound reached, continuing as new");
                carry = next;
            }
            Exit::Shutdown => break,
        }
    }
    info!(actor = %A::KIND, instances = instance, "actor stopped");
}
