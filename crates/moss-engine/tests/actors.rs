//! End-to-end tests for the four actors.
//!
//! Each test spawns a full creature on tokio's paused clock, drives it
//! through its addresses, and waits on the published snapshots.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]

mod common;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use common::{PATIENCE, ScriptedGenerator, TokioClock, config, hatched, noon, single_line_pool};
use moss_engine::error::QueryError;
use moss_engine::{Creature, Seed};
use moss_sim::actions::EGG_REPLY;
use moss_sim::{Clock, chat, fallback, vitals};
use moss_types::{
    Action, Category, ChatRole, ChatState, CreatureId, MysteryUpdate, Personality, PetState,
    Stage, Track,
};

async fn settle<T>(wait: impl Future<Output = Result<T, QueryError>>) -> T {
    tokio::time::timeout(PATIENCE, wait).await.unwrap().unwrap()
}

async fn start(
    generator: &Arc<ScriptedGenerator>,
    pet: Option<PetState>,
) -> (Creature, Arc<TokioClock>) {
    start_with(config(), generator, pet).await
}

async fn start_with(
    config: moss_engine::MossConfig,
    generator: &Arc<ScriptedGenerator>,
    pet: Option<PetState>,
) -> (Creature, Arc<TokioClock>) {
    let clock = Arc::new(TokioClock::starting_at(noon()));
    let seed = Seed {
        pet,
        chat: ChatState::default(),
    };
    let creature = moss_engine::spawn(config, Arc::<TokioClock>::clone(&clock), Arc::clone(generator), seed)
        .await
        .unwrap();
    (creature, clock)
}

/// Two hours since the last visit and bond below forty: a sassy creature.
fn neglected(now: chrono::DateTime<chrono::Utc>) -> PetState {
    let mut state = hatched(now);
    state.created_at = now.checked_sub_signed(chrono::Duration::days(1)).unwrap();
    state.fullness = 15.0;
    state.happiness = 80.0;
    state.bond = 25.0;
    state.hp = 100.0;
    state.care.total_interactions = 20;
    state.care.last_interaction_at = now.checked_sub_signed(chrono::Duration::hours(3)).unwrap();
    state
}

#[tokio::test(start_paused = true)]
async fn feeding_an_egg_is_refused() {
    let generator = Arc::new(ScriptedGenerator::default());
    let (creature, _clock) = start(&generator, None).await;

    creature.pet().act(Action::Feed).unwrap();
    let state = settle(creature.pet().wait_for(|s| s.message == EGG_REPLY)).await;
    assert!((state.fullness - 70.0).abs() < 1.0);
    assert_eq!(state.care.total_interactions, 0);

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn feeding_updates_stats_and_care() {
    let generator = Arc::new(ScriptedGenerator::default());
    let now = noon();
    let (creature, _clock) = start(&generator, Some(hatched(now))).await;

    creature.pet().act(Action::Feed).unwrap();
    let state = settle(
        creature
            .pet()
            .wait_for(|s| s.last_action == Some(Action::Feed)),
    )
    .await;
    assert!(state.fullness > 70.0);
    assert_eq!(state.care.total_interactions, 1);
    assert!(!state.message.is_empty());
    assert!(state.cooldowns.last_feed.is_some());

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn startup_pool_is_installed_and_cooldown_holds() {
    let generator = Arc::new(ScriptedGenerator::default());
    generator.push_pool(single_line_pool("*scripted munch*"));
    let (creature, _clock) = start(&generator, Some(hatched(noon()))).await;

    settle(creature.pet().wait_for(|s| s.runtime_pool.is_some())).await;
    let status = settle(creature.pool().wait_for(|s| s.generated == 1)).await;
    assert!(status.last_generated_at.is_some());
    assert_eq!(generator.pool_requests().len(), 1);

    // The first interaction changes the personality, but the pool is fresh.
    creature.pet().act(Action::Feed).unwrap();
    let state = settle(
        creature
            .pet()
            .wait_for(|s| s.last_action == Some(Action::Feed)),
    )
    .await;
    assert_eq!(state.message, "*scripted munch*");
    assert_ne!(state.personality, Personality::Shy);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(generator.pool_requests().len(), 1);

    creature.shutdown().await.unwrap();
}

/// Default timing with stats that hold still, for tests that wait out
/// the pool cooldown.
fn still_config() -> moss_engine::MossConfig {
    let mut config = config();
    config.vitals.fullness_decay = 0.0;
    config.vitals.happiness_decay = 0.0;
    config.vitals.bond_decay = 0.0;
    config
}

#[tokio::test(start_paused = true)]
async fn hatching_asks_for_a_baby_pool() {
    let generator = Arc::new(ScriptedGenerator::default());
    generator.push_pool(single_line_pool("*egg wobble*"));
    generator.push_pool(single_line_pool("*tiny squeak*"));
    let mut config = config();
    config.timing.pool_cooldown_secs = 1.0;
    let born = noon().checked_sub_signed(chrono::Duration::seconds(55)).unwrap();
    let egg = vitals::hatch(CreatureId::new(), born, 0);
    let (creature, _clock) = start_with(config, &generator, Some(egg)).await;

    settle(creature.pool().wait_for(|s| s.generated == 2)).await;
    let requests = generator.pool_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].stage, Stage::Egg);
    assert_eq!(requests[1].stage, Stage::Baby);
    assert_eq!(requests[1].personality, Personality::Shy);

    let state = settle(creature.pet().wait_for(|s| s.stage == Stage::Baby)).await;
    assert_eq!(state.personality, Personality::Shy);

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn personality_change_after_cooldown_asks_for_a_new_pool() {
    let generator = Arc::new(ScriptedGenerator::default());
    generator.push_pool(single_line_pool("*shy blink*"));
    generator.push_pool(single_line_pool("*steady hum*"));
    let (creature, clock) = start_with(still_config(), &generator, Some(hatched(noon()))).await;

    settle(creature.pool().wait_for(|s| s.generated == 1)).await;
    tokio::time::sleep(Duration::from_secs(601)).await;
    assert_eq!(generator.pool_requests().len(), 1);

    creature.pet().act(Action::Feed).unwrap();
    let status = settle(creature.pool().wait_for(|s| s.generated == 2)).await;
    assert!(status.last_generated_at.unwrap() >= noon() + chrono::Duration::seconds(600));
    let requests = generator.pool_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].personality, Personality::Shy);
    assert_eq!(requests[1].personality, Personality::Stoic);

    let state = settle(creature.pet().wait_for(|s| {
        s.runtime_pool
            .as_ref()
            .and_then(|pool| pool.get(Category::FeedSuccess))
            .is_some_and(|lines| lines == ["*steady hum*"])
    }))
    .await;
    assert_eq!(state.personality, Personality::Stoic);
    assert!(clock.now() >= noon() + chrono::Duration::seconds(601));

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn scheduled_refresh_waits_out_the_pool_cooldown() {
    let generator = Arc::new(ScriptedGenerator::default());
    generator.push_pool(single_line_pool("*first*"));
    generator.push_pool(single_line_pool("*second*"));
    let mut config = still_config();
    config.timing.pool_refresh_secs = 60;
    let (creature, clock) = start_with(config, &generator, Some(hatched(noon()))).await;

    settle(creature.pool().wait_for(|s| s.generated == 1)).await;
    // Nine refresh ticks fall inside the cooldown.
    tokio::time::sleep(Duration::from_secs(590)).await;
    assert_eq!(generator.pool_requests().len(), 1);
    assert_eq!(creature.pool().snapshot().unwrap().generated, 1);

    settle(creature.pool().wait_for(|s| s.generated == 2)).await;
    assert!(clock.now() >= noon() + chrono::Duration::seconds(600));
    assert_eq!(generator.pool_requests().len(), 2);

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn failed_generation_keeps_static_lines() {
    let generator = Arc::new(ScriptedGenerator::default());
    let (creature, _clock) = start(&generator, Some(hatched(noon()))).await;

    let status = settle(creature.pool().wait_for(|s| s.failed == 1)).await;
    assert_eq!(status.generated, 0);
    // One request, retried to the limit.
    assert_eq!(generator.pool_requests().len(), 3);
    assert!(creature.pet().state().unwrap().runtime_pool.is_none());

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn neglected_creature_asks_for_food_in_character() {
    let generator = Arc::new(ScriptedGenerator::default());
    let (creature, _clock) = start(&generator, Some(neglected(noon()))).await;

    let lines = fallback::personality_pool(Personality::Sassy)
        .get(Category::NeedsFood)
        .unwrap()
        .to_vec();
    assert!(!lines.is_empty());

    let state = settle(creature.pet().wait_for(|s| lines.contains(&s.message))).await;
    assert_eq!(state.personality, Personality::Sassy);

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn need_lines_wait_out_the_grace_window() {
    let generator = Arc::new(ScriptedGenerator::default());
    let mut config = config();
    config.timing.grace_secs = 120.0;
    let mut pet = neglected(noon());
    pet.care.total_interactions = 5;
    pet.care.last_interaction_at = noon();
    let (creature, _clock) = start_with(config, &generator, Some(pet)).await;

    // One need poll has run; the housekeeping timer has not.
    tokio::time::sleep(Duration::from_secs(45)).await;
    assert_eq!(creature.pet().state().unwrap().message, "");

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn mystery_fails_after_the_last_hint() {
    let generator = Arc::new(ScriptedGenerator::default());
    let (creature, _clock) = start(&generator, Some(hatched(noon()))).await;
    let hints = [
        "It only happens when the sky is clear.",
        "The pattern gets stronger right before dawn.",
        "It sounds a lot like a very distant, very old star spinning fast.",
    ];
    for hint in hints {
        generator.push_reply(
            "*hmm* here's a clue",
            Some(MysteryUpdate {
                hint_given: Some(hint.to_owned()),
                ..MysteryUpdate::default()
            }),
        );
    }
    generator.push_reply("Nope!", None);

    creature
        .chat()
        .start_mystery("cosmic-radio", Some(Track::Fun))
        .unwrap();
    for guess in ["a radio?", "a bird?", "aliens?", "a lighthouse?"] {
        creature.chat().send_message(guess).unwrap();
    }

    let state = settle(
        creature
            .chat()
            .wait_for(|s| s.messages.len() == 9 && !s.is_typing),
    )
    .await;
    let last = state.messages.last().unwrap();
    assert_eq!(last.role, ChatRole::Assistant);
    assert!(last.content.starts_with("Nope!"));
    assert!(last.content.contains("The answer was: A pulsar"));
    assert!(state.active_mystery.is_none());
    assert!(state.solved.is_empty());
    assert!(!creature.chat().mystery_status().unwrap().active);

    let requests = generator.chat_requests();
    assert_eq!(requests.len(), 4);
    let first = requests[0].mystery.as_ref().unwrap();
    assert_eq!(first.next_hint.as_deref(), Some(hints[0]));
    assert!(requests[0].pet.is_some());
    assert_eq!(requests[3].mystery.as_ref().unwrap().progress, 3);

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn solved_mystery_is_remembered() {
    let generator = Arc::new(ScriptedGenerator::default());
    let (creature, _clock) = start(&generator, Some(hatched(noon()))).await;
    generator.push_reply(
        "YES! A pulsar!",
        Some(MysteryUpdate {
            solved: true,
            ..MysteryUpdate::default()
        }),
    );

    creature
        .chat()
        .start_mystery("cosmic-radio", Some(Track::Fun))
        .unwrap();
    creature.chat().send_message("a pulsar").unwrap();

    let state = settle(
        creature
            .chat()
            .wait_for(|s| s.messages.len() == 3 && !s.is_typing),
    )
    .await;
    assert!(state.solved.contains("cosmic-radio"));
    assert!(state.active_mystery.is_none());
    assert_eq!(state.messages[2].content, "YES! A pulsar!");

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn unknown_mystery_is_ignored() {
    let generator = Arc::new(ScriptedGenerator::default());
    let (creature, _clock) = start(&generator, Some(hatched(noon()))).await;

    creature
        .chat()
        .start_mystery("no-such-riddle", Some(Track::Fun))
        .unwrap();
    creature.chat().send_message("hello").unwrap();
    let state = settle(
        creature
            .chat()
            .wait_for(|s| s.messages.len() == 2 && !s.is_typing),
    )
    .await;
    assert!(state.active_mystery.is_none());
    assert_eq!(state.messages[0].content, "hello");

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn offline_chat_answers_by_mood() {
    let generator = Arc::new(ScriptedGenerator::default());
    let (creature, clock) = start(&generator, Some(hatched(noon()))).await;

    creature.chat().send_message("how are you?").unwrap();
    let history = settle(
        creature
            .chat()
            .wait_for(|s| s.messages.len() == 2 && !s.is_typing),
    )
    .await;
    let view = creature
        .pet()
        .view(clock.now(), &moss_sim::VitalsConfig::default())
        .unwrap();
    assert_eq!(
        history.messages[1].content,
        chat::fallback_reply(Some(view.mood))
    );
    assert_eq!(generator.chat_requests().len(), 3);

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn blank_messages_are_ignored() {
    let generator = Arc::new(ScriptedGenerator::default());
    let (creature, _clock) = start(&generator, Some(hatched(noon()))).await;

    creature.chat().send_message("   ").unwrap();
    creature.chat().send_message("hi").unwrap();
    let state = settle(
        creature
            .chat()
            .wait_for(|s| s.messages.len() == 2 && !s.is_typing),
    )
    .await;
    assert_eq!(state.messages[0].content, "hi");

    creature.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn educational_reply_replaces_the_placeholder() {
    let generator = Arc::new(ScriptedGenerator::default());
    let (creature, _clock) = start(&generator, Some(hatched(noon()))).await;
    generator.push_reply("I dry out into a tiny barrel called a tun!", None);

    creature
        .chat()
        .start_mystery("cryptobiosis", Some(Track::Educational))
        .unwrap();
    creature.chat().send_message("how do you survive?").unwrap();

    let state = settle(
        creature
            .chat()
            .wait_for(|s| s.messages.len() == 3 && !s.is_typing),
    )
    .await;
    assert!(
        state
            .messages
            .iter()
            .all(|m| m.content != chat::SEARCHING_PLACEHOLDER)
    );
    assert_eq!(
        state.messages[2].content,
        "I dry out into a tiny barrel called a tun!"
    );
    // Topics without hints stay open until the model closes them.
    assert!(state.active_mystery.is_some());

    let request = &generator.chat_requests()[0];
    assert_eq!(request.track, Track::Educational);
    assert_eq!(
        request.messages.last().unwrap().content,
        "how do you survive?"
    );
    assert!(
        request
            .messages
            .iter()
            .all(|m| m.content != chat::SEARCHING_PLACEHOLDER)
    );

    creature.shutdown().await.unwrap();
}
