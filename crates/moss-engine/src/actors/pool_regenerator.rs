//! The pool regenerator.
//!
//! Turns regeneration requests from the pet into generation calls and
//! hands the resulting pool back. A periodic timer refreshes the pool
//! from the pet's current persona. Failures are logged and the pet keeps
//! its current lines.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use moss_generator::GenerationService;
use moss_sim::personality::bond_description;
use moss_sim::{Clock, clock, vitals};
use moss_types::{Personality, PetSignal, PoolRequest, PoolSignal, Stage};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::MossConfig;
use crate::continuation::{Continuable, Exit, HistoryBudget};
use crate::mailbox::{Inbox, PetAddress, PoolStatus};
use crate::retry::with_backoff;
use crate::supervisor::{ActorContext, ActorKind};

/// The pool regenerator actor.
pub struct PoolRegenerator<G> {
    clock: Arc<dyn Clock>,
    config: Arc<MossConfig>,
    generator: Arc<G>,
    inbox: Inbox<PoolSignal, PoolStatus>,
    pet: PetAddress,
    context: ActorContext,
    status: PoolStatus,
}

impl<G: GenerationService> PoolRegenerator<G> {
    /// Assemble the regenerator.
    pub fn new(
        clock: Arc<dyn Clock>,
        config: Arc<MossConfig>,
        generator: Arc<G>,
        inbox: Inbox<PoolSignal, PoolStatus>,
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
            status: PoolStatus::default(),
        }
    }

    async fn regenerate(&mut self, personality: Personality, stage: Stage, bond: f64) {
        let request = PoolRequest {
            personality,
            stage,
            bond_description: bond_description(bond).to_owned(),
        };
        let generator = &self.generator;
        let request_ref = &request;
        let result = with_backoff(&self.config.retry.generation, "generate-pool", move || {
            generator.generate_pool(request_ref)
        })
        .await;

        match result {
            Ok(pool) => {
                let generated_at = self.clock.now();
                info!(
                    personality = %personality,
                    stage = %stage,
                    covered = pool.covered(),
                    "pool generated"
                );
                if let Err(e) = self.pet.signal(PetSignal::PoolResult {
                    pool: Some(pool),
                    generated_at,
                }) {
                    warn!(error = %e, "could not deliver pool to pet");
                    return;
                }
                self.status.generated = self.status.generated.saturating_add(1);
                self.status.last_generated_at = Some(generated_at);
            }
            Err(e) => {
                warn!(
                    error = %e,
                    personality = %personality,
                    "pool generation failed, pet keeps its current lines"
                );
                self.status.failed = self.status.failed.saturating_add(1);
            }
        }
        self.inbox.publish(self.status.clone());
    }

    async fn scheduled_refresh(&mut self) {
        let pet = &self.pet;
        let stored = match with_backoff(&self.config.retry.query, "pet-state", move || async move {
            pet.state()
        })
        .await
        {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "pet unavailable, skipping scheduled pool refresh");
                return;
            }
        };
        let now = self.clock.now();
        let last = stored.pool_generated_at.max(self.status.last_generated_at);
        if on_cooldown(last, now, self.config.timing.pool_cooldown_secs) {
            debug!("pool regenerated recently, skipping scheduled refresh");
            return;
        }
        let current = vitals::current_state(&stored, now, &self.config.vitals);
        debug!("scheduled pool refresh");
        self.regenerate(current.personality, current.stage, current.bond)
            .await;
    }
}

/// Whether a pool stamped at `last` is still inside the regeneration cooldown.
fn on_cooldown(last: Option<DateTime<Utc>>, now: DateTime<Utc>, cooldown_secs: f64) -> bool {
    last.is_some_and(|at| clock::elapsed_secs(at, now) < cooldown_secs)
}

impl<G: GenerationService> Continuable for PoolRegenerator<G> {
    type Carry = ();
    const KIND: ActorKind = ActorKind::PoolRegenerator;

    async fn run_instance(&mut self, (): ()) -> Exit<()> {
        self.inbox.publish(self.status.clone());
        self.context.mark_ready();
        let period = self.config.timing.pool_refresh();
        let mut refresh = time::interval(period);
        refresh.reset();
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut budget = HistoryBudget::new(self.config.continuation.pool_events);
        info!(refresh_secs = period.as_secs(), "pool regenerator running");

        loop {
            tokio::select! {
                biased;
                () = self.context.shutdown.requested() => return Exit::Shutdown,
                signal = self.inbox.recv() => match signal {
                    Some(PoolSignal::PoolRegenerate { personality, stage, bond }) => {
                        self.regenerate(personality, stage, bond).await;
                    }
                    None => return Exit::Shutdown,
                },
                _ = refresh.tick() => self.scheduled_refresh().await,
            }

            budget.record();
            if budget.exhausted() {
                return Exit::Continue(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn cooldown_counts_from_the_last_stamp() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap_or_default();
        let later = |secs| at + Duration::seconds(secs);

        assert!(!on_cooldown(None, at, 600.0));
        assert!(on_cooldown(Some(at), at, 600.0));
        assert!(on_cooldown(Some(at), later(599), 600.0));
        assert!(!on_cooldown(Some(at), later(600), 600.0));
    }
}
