//! The pet actor: sole owner of the creature's state.
//!
//! Handles care actions, need lines from the poller and generated pools,
//! and runs a housekeeping timer for decay, the sleep cycle and idle
//! chatter. After every event it publishes the updated state and asks
//! for a fresh pool when the personality or life stage has changed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use moss_sim::{Clock, PoolSelector, actions, clock, needs, vitals};
use moss_types::{
    Action, Category, MessagePool, Personality, PetSignal, PetState, PoolSignal, TimeOfDay,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::MossConfig;
use crate::continuation::{Continuable, Exit, HistoryBudget};
use crate::mailbox::{Inbox, PoolAddress};
use crate::supervisor::{ActorContext, ActorKind};

/// Why a pool regeneration was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoolTrigger {
    Startup,
    PersonalityChange,
    StageChange,
}

impl PoolTrigger {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::PersonalityChange => "personality-change",
            Self::StageChange => "stage-change",
        }
    }
}

/// The pet actor.
pub struct PetActor {
    clock: Arc<dyn Clock>,
    config: Arc<MossConfig>,
    inbox: Inbox<PetSignal, PetState>,
    pool: PoolAddress,
    context: ActorContext,
    rng: SmallRng,
}

impl PetActor {
    /// Assemble the actor around its inbox.
    pub fn new(
        clock: Arc<dyn Clock>,
        config: Arc<MossConfig>,
        inbox: Inbox<PetSignal, PetState>,
        pool: PoolAddress,
        context: ActorContext,
    ) -> Self {
        Self {
            clock,
            config,
            inbox,
            pool,
            context,
            rng: SmallRng::from_os_rng(),
        }
    }

    fn handle(&mut self, state: &mut PetState, signal: PetSignal) {
        let now = self.clock.now();
        debug!(signal = signal.kind(), "pet signal");
        match signal {
            PetSignal::UpdateNeedMessage {
                message,
                personality,
            } => self.apply_need_message(state, message, personality, now),
            PetSignal::PoolResult { pool, generated_at } => {
                Self::apply_pool(state, pool, generated_at);
            }
            PetSignal::Feed | PetSignal::Play | PetSignal::Pet | PetSignal::Wake => {
                if let Some(action) = signal.action() {
                    self.apply_action(state, action, now);
                }
            }
        }
    }

    fn apply_action(&mut self, state: &mut PetState, action: Action, now: DateTime<Utc>) {
        let outcome = actions::apply(state, action, now, &self.config.vitals);
        let line = outcome
            .reply
            .resolve(&PoolSelector::for_state(state), &mut self.rng);
        if let Some(line) = line {
            state.message = line;
        }
        info!(
            action = action.as_str(),
            applied = outcome.applied,
            fullness = state.fullness,
            happiness = state.happiness,
            bond = state.bond,
            hp = state.hp,
            "care action handled"
        );
    }

    fn apply_need_message(
        &self,
        state: &mut PetState,
        message: Option<String>,
        observed: Option<Personality>,
        now: DateTime<Utc>,
    ) {
        vitals::refresh(state, now, &self.config.vitals);
        if let Some(observed) = observed
            && observed != state.personality
        {
            debug!(
                observed = %observed,
                derived = %state.personality,
                "need poller saw a stale personality"
            );
        }

        let Some(line) = message.filter(|line| !line.trim().is_empty()) else {
            return;
        };
        if needs::within_grace(state, now, self.config.timing.grace_secs) {
            debug!("need line arrived inside the grace window, dropped");
        } else {
            state.message = line;
        }
    }

    fn apply_pool(state: &mut PetState, pool: Option<MessagePool>, generated_at: DateTime<Utc>) {
        match pool {
            Some(pool) => {
                info!(covered = pool.covered(), "runtime pool installed");
                state.runtime_pool = Some(pool);
                state.pool_generated_at = Some(generated_at);
            }
            None => info!("no generated pool, keeping static lines"),
        }
    }

    fn housekeep(&mut self, state: &mut PetState, last_time_of_day: &mut TimeOfDay) {
        let now = self.clock.now();
        vitals::advance(state, now, &self.config.vitals);

        let time_of_day = clock::time_of_day(now, state.utc_offset_minutes);
        if let Some(sleeping) = clock::sleep_transition(*last_time_of_day, time_of_day)
            && sleeping != state.sleeping
            && !vitals::is_dormant(state)
        {
            state.sleeping = sleeping;
            info!(sleeping, time_of_day = ?time_of_day, "sleep cycle");
        }
        *last_time_of_day = time_of_day;

        vitals::refresh(state, now, &self.config.vitals);
        if needs::within_grace(state, now, self.config.timing.grace_secs)
            || needs::most_urgent(state, &self.config.vitals).is_some()
        {
            return;
        }
        let category = Category::idle(vitals::mood(state));
        if let Some(line) = PoolSelector::for_state(state).pick(category, &mut self.rng) {
            state.message = line.to_owned();
        }
    }

    /// Ask for a fresh pool unless one was requested within the cooldown.
    ///
    /// The request time is stamped before the result arrives, so a burst
    /// of triggers produces one request.
    fn request_pool(&self, state: &mut PetState, now: DateTime<Utc>, trigger: PoolTrigger) {
        let cooldown = self.config.timing.pool_cooldown_secs;
        if let Some(at) = state.pool_generated_at
            && clock::elapsed_secs(at, now) < cooldown
        {
            debug!(trigger = trigger.as_str(), "pool regeneration on cooldown, skipped");
            return;
        }

        state.pool_generated_at = Some(now);
        let signal = PoolSignal::PoolRegenerate {
            personality: state.personality,
            stage: state.stage,
            bond: state.bond,
        };
        match self.pool.signal(signal) {
            Ok(()) => info!(
                trigger = trigger.as_str(),
                personality = %state.personality,
                stage = %state.stage,
                "pool regeneration requested"
            ),
            Err(e) => warn!(error = %e, "could not request pool regeneration"),
        }
    }
}

/// State the next instance starts from.
///
/// The runtime pool is dropped and regenerated by the new instance.
fn carry_over(state: &PetState) -> PetState {
    PetState {
        runtime_pool: None,
        pool_generated_at: None,
        generation: state.generation.saturating_add(1),
        ..state.clone()
    }
}

impl Continuable for PetActor {
    type Carry = PetState;
    const KIND: ActorKind = ActorKind::Pet;

    async fn run_instance(&mut self, carry: PetState) -> Exit<PetState> {
        let mut state = carry;
        let now = self.clock.now();
        vitals::refresh(&mut state, now, &self.config.vitals);
        self.request_pool(&mut state, now, PoolTrigger::Startup);
        self.inbox.publish(state.clone());
        self.context.mark_ready();
        info!(
            creature = %state.creature_id,
            generation = state.generation,
            stage = %state.stage,
            personality = %state.personality,
            "pet running"
        );

        let period = self.config.timing.housekeeping();
        let mut housekeeping = time::interval(period);
        housekeeping.reset();
        housekeeping.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_time_of_day = clock::time_of_day(now, state.utc_offset_minutes);
        let mut budget = HistoryBudget::new(self.config.continuation.pet_events);

        loop {
            let (personality, stage) = (state.personality, state.stage);

            tokio::select! {
                biased;
                () = self.context.shutdown.requested() => return Exit::Shutdown,
                signal = self.inbox.recv() => match signal {
                    Some(signal) => self.handle(&mut state, signal),
                    None => return Exit::Shutdown,
                },
                _ = housekeeping.tick() => self.housekeep(&mut state, &mut last_time_of_day),
            }

            let now = self.clock.now();
            vitals::refresh(&mut state, now, &self.config.vitals);
            if state.personality != personality {
                info!(from = %personality, to = %state.personality, "personality changed");
                self.request_pool(&mut state, now, PoolTrigger::PersonalityChange);
            } else if state.stage != stage {
                info!(from = %stage, to = %state.stage, "stage changed");
                self.request_pool(&mut state, now, PoolTrigger::StageChange);
            }
            self.inbox.publish(state.clone());

            budget.record();
            if budget.exhausted() {
                return Exit::Continue(carry_over(&state));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use moss_types::{CreatureId, Stage};

    use super::*;

    #[test]
    fn carry_keeps_identity_and_bumps_generation() {
        let born = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap();
        let mut state = vitals::hatch(CreatureId::new(), born, 60);
        state.bond = 77.0;
        state.stage = Stage::Teen;
        state.runtime_pool = Some(MessagePool::new());
        state.pool_generated_at = Some(born);

        let next = carry_over(&state);
        assert_eq!(next.creature_id, state.creature_id);
        assert_eq!(next.created_at, born);
        assert_eq!(next.generation, 2);
        assert_eq!(next.utc_offset_minutes, 60);
        assert!((next.bond - 77.0).abs() < f64::EPSILON);
        assert!(next.runtime_pool.is_none());
        assert!(next.pool_generated_at.is_none());
    }
}
