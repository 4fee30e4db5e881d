//! Shared fixtures for the engine integration tests.
//!
//! Tests run on tokio's paused clock. [`TokioClock`] follows that clock so
//! the simulation's wall time and the actors' timers advance together.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use moss_engine::MossConfig;
use moss_generator::{GenerationError, GenerationService};
use moss_sim::{Clock, vitals};
use moss_types::{
    Category, ChatReply, ChatRequest, CreatureId, MessagePool, MysteryUpdate, PetState,
    PoolRequest,
};

/// Midday, so a creature at offset zero is awake.
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Wall clock driven by tokio's (possibly paused) time.
pub struct TokioClock {
    base: DateTime<Utc>,
    start: tokio::time::Instant,
}

impl TokioClock {
    /// A clock reading `base` right now.
    pub fn starting_at(base: DateTime<Utc>) -> Self {
        Self {
            base,
            start: tokio::time::Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.start.elapsed()).unwrap_or_default();
        self.base.checked_add_signed(elapsed).unwrap_or(self.base)
    }
}

/// Generation service that replays queued results.
///
/// An empty queue answers [`GenerationError::Offline`].
#[derive(Default)]
pub struct ScriptedGenerator {
    pools: Mutex<VecDeque<MessagePool>>,
    replies: Mutex<VecDeque<ChatReply>>,
    pool_requests: Mutex<Vec<PoolRequest>>,
    chat_requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedGenerator {
    /// Queue a pool result.
    pub fn push_pool(&self, pool: MessagePool) {
        self.pools.lock().unwrap().push_back(pool);
    }

    /// Queue a chat reply.
    pub fn push_reply(&self, response: &str, update: Option<MysteryUpdate>) {
        self.replies.lock().unwrap().push_back(ChatReply {
            response: response.to_owned(),
            mystery_update: update,
        });
    }

    /// Every pool request seen so far, retries included.
    pub fn pool_requests(&self) -> Vec<PoolRequest> {
        self.pool_requests.lock().unwrap().clone()
    }

    /// Every chat request seen so far, retries included.
    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().unwrap().clone()
    }
}

impl GenerationService for ScriptedGenerator {
    async fn generate_pool(&self, request: &PoolRequest) -> Result<MessagePool, GenerationError> {
        self.pool_requests.lock().unwrap().push(request.clone());
        self.pools
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(GenerationError::Offline)
    }

    async fn generate_chat(&self, request: &ChatRequest) -> Result<ChatReply, GenerationError> {
        self.chat_requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(GenerationError::Offline)
    }
}

/// A pool that answers every category with one line.
pub fn single_line_pool(line: &str) -> MessagePool {
    let mut pool = MessagePool::new();
    for category in Category::ALL {
        pool.insert(category, vec![line.to_owned()]);
    }
    pool
}

/// A hatched, awake creature two hours old with fresh stats.
pub fn hatched(now: DateTime<Utc>) -> PetState {
    let mut state = vitals::hatch(CreatureId::new(), now, 0);
    state.created_at = now.checked_sub_signed(chrono::Duration::hours(2)).unwrap();
    state.fullness = 50.0;
    state.happiness = 60.0;
    state
}

/// Default configuration.
pub fn config() -> MossConfig {
    MossConfig::default()
}

/// Upper bound on how long a test waits for an actor to reach a state.
pub const PATIENCE: Duration = Duration::from_secs(600);
