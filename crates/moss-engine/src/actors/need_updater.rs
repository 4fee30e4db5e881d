//! The need poller.
//!
//! Wakes on a fixed period, reads the pet's state, and tells the pet
//! about any personality drift and the line for its most urgent need.
//! The pet re-checks the grace window on arrival; the poller checks it
//! first so it does not pick a line that would be dropped.

use std::sync::Arc;

use moss_sim::{Clock, PoolSelector, needs, vitals};
use moss_types::{Category, PetSignal};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::MossConfig;
use crate::continuation::{Continuable, Exit, HistoryBudget};
use crate::mailbox::PetAddress;
use crate::retry::with_backoff;
use crate::supervisor::{ActorContext, ActorKind};

/// The need poller actor.
pub struct NeedUpdater {
    clock: Arc<dyn Clock>,
    config: Arc<MossConfig>,
    pet: PetAddress,
    context: ActorContext,
    rng: SmallRng,
}

impl NeedUpdater {
    /// Assemble the poller.
    pub fn new(
        clock: Arc<dyn Clock>,
        config: Arc<MossConfig>,
        pet: PetAddress,
        context: ActorContext,
    ) -> Self {
        Self {
            clock,
            config,
            pet,
            context,
            rng: SmallRng::from_os_rng(),
        }
    }

    async fn poll(&mut self) {
        let pet = &self.pet;
        let stored = match with_backoff(&self.config.retry.query, "pet-state", move || async move {
            pet.state()
        })
        .await
        {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "pet unavailable, skipping need poll");
                return;
            }
        };

        let now = self.clock.now();
        let current = vitals::current_state(&stored, now, &self.config.vitals);
        let drifted = current.personality != stored.personality;

        let message = if needs::within_grace(&current, now, self.config.timing.grace_secs) {
            debug!("inside the grace window, no need line");
            None
        } else {
            needs::most_urgent(&current, &self.config.vitals).and_then(|need| {
                PoolSelector::for_state(&current)
                    .pick(Category::for_need(need), &mut self.rng)
                    .map(ToOwned::to_owned)
            })
        };

        if message.is_none() && !drifted {
            return;
        }
        debug!(
            personality = %current.personality,
            drifted,
            has_line = message.is_some(),
            "signalling pet"
        );
        if let Err(e) = self.pet.signal(PetSignal::UpdateNeedMessage {
            message,
            personality: Some(current.personality),
        }) {
            warn!(error = %e, "could not deliver need update");
        }
    }
}

impl Continuable for NeedUpdater {
    type Carry = ();
    const KIND: ActorKind = ActorKind::NeedUpdater;

    async fn run_instance(&mut self, (): ()) -> Exit<()> {
        self.context.mark_ready();
        let period = self.config.timing.need_poll();
        let mut ticker = time::interval(period);
        ticker.reset();
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut budget = HistoryBudget::new(self.config.continuation.need_iterations);
        info!(period_secs = period.as_secs(), "need poller running");

        loop {
            tokio::select! {
                biased;
                () = self.context.shutdown.requested() => return Exit::Shutdown,
                _ = ticker.tick() => self.poll().await,
            }

            budget.record();
            if budget.exhausted() {
                return Exit::Continue(());
            }
        }
    }
}
