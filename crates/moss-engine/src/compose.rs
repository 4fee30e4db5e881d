//! Composition root.
//!
//! Builds every mailbox before any actor runs, then hands the supervisor
//! an explicit table of actor specs and launchers. The returned
//! [`Creature`] is the only way in: its addresses carry all signals and
//! queries.

use std::sync::Arc;

use moss_generator::GenerationService;
use moss_sim::{Clock, vitals};
use moss_types::{ChatState, CreatureId, PetState};
use tracing::info;

use crate::actors::{ChatActor, NeedUpdater, PetActor, PoolRegenerator};
use crate::config::MossConfig;
use crate::continuation::host;
use crate::error::SupervisorError;
use crate::mailbox::{ChatAddress, PetAddress, PoolAddress, PoolStatus, mailbox};
use crate::supervisor::{ActorContext, ActorKind, ActorSpec, Launch, Supervisor};

/// Where a creature starts from.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    /// Existing pet state. A new creature hatches when absent.
    pub pet: Option<PetState>,
    /// Existing conversation.
    pub chat: ChatState,
}

/// A running creature.
#[derive(Debug)]
pub struct Creature {
    pet: PetAddress,
    chat: ChatAddress,
    pool: PoolAddress,
    supervisor: Supervisor,
}

impl Creature {
    /// The pet actor.
    pub const fn pet(&self) -> &PetAddress {
        &self.pet
    }

    /// The chat actor.
    pub const fn chat(&self) -> &ChatAddress {
        &self.chat
    }

    /// The pool regenerator.
    pub const fn pool(&self) -> &PoolAddress {
        &self.pool
    }

    /// Actors in start order.
    pub fn running(&self) -> Vec<ActorKind> {
        self.supervisor.running()
    }

    /// Stop every actor after its in-flight event.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::TaskFailed`] if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), SupervisorError> {
        self.supervisor.shutdown().await
    }
}

/// Start a creature's actors.
///
/// # Errors
///
/// Returns a [`SupervisorError`] if an actor fails to start.
pub async fn spawn<G: GenerationService>(
    config: MossConfig,
    clock: Arc<dyn Clock>,
    generator: Arc<G>,
    seed: Seed,
) -> Result<Creature, SupervisorError> {
    let config = Arc::new(config);
    let pet_state = seed.pet.unwrap_or_else(|| {
        vitals::hatch(
            CreatureId::new(),
            clock.now(),
            config.creature.utc_offset_minutes,
        )
    });
    info!(
        creature = %pet_state.creature_id,
        generation = pet_state.generation,
        "starting creature"
    );

    let (pet, pet_inbox) = mailbox(ActorKind::Pet, pet_state.clone());
    let (pool, pool_inbox) = mailbox(ActorKind::PoolRegenerator, PoolStatus::default());
    let (chat, chat_inbox) = mailbox(ActorKind::Chat, seed.chat.clone());

    let pet_launch: Launch = {
        let (clock, config, pool) = (Arc::clone(&clock), Arc::clone(&config), pool.clone());
        Box::new(move |context: ActorContext| {
            let actor = PetActor::new(clock, config, pet_inbox, pool, context);
            tokio::spawn(host(actor, pet_state))
        })
    };
    let need_launch: Launch = {
        let (clock, config, pet) = (Arc::clone(&clock), Arc::clone(&config), pet.clone());
        Box::new(move |context: ActorContext| {
            let actor = NeedUpdater::new(clock, config, pet, context);
            tokio::spawn(host(actor, ()))
        })
    };
    let pool_launch: Launch = {
        let (clock, config, generator, pet) = (
            Arc::clone(&clock),
            Arc::clone(&config),
            Arc::clone(&generator),
            pet.clone(),
        );
        Box::new(move |context: ActorContext| {
            let actor = PoolRegenerator::new(clock, config, generator, pool_inbox, pet, context);
            tokio::spawn(host(actor, ()))
        })
    };
    let chat_launch: Launch = {
        let (clock, config, generator, pet) = (
            Arc::clone(&clock),
            Arc::clone(&config),
            Arc::clone(&generator),
            pet.clone(),
        );
        let carry = seed.chat;
        Box::new(move |context: ActorContext| {
            let actor = ChatActor::new(clock, config, generator, chat_inbox, pet, context);
            tokio::spawn(host(actor, carry))
        })
    };

    let table: Vec<(ActorSpec, Launch)> = vec![
        (ActorSpec::new(ActorKind::Pet, []), pet_launch),
        (ActorSpec::new(ActorKind::NeedUpdater, [ActorKind::Pet]), need_launch),
        (
            ActorSpec::new(ActorKind::PoolRegenerator, [ActorKind::Pet]),
            pool_launch,
        ),
        (ActorSpec::new(ActorKind::Chat, [ActorKind::Pet]), chat_launch),
    ];
    let supervisor = Supervisor::start(table).await?;
    info!(actors = ?supervisor.running(), "creature running");

    Ok(Creature {
        pet,
        chat,
        pool,
        supervisor,
    })
}
