//! Dialogue and mystery state machine.
//!
//! A session is idle until a mystery starts. While active, each generated
//! reply may reveal a hint, mark the mystery solved or fail it. A reply
//! that arrives after every hint is out, without solving and without a
//! new hint, fails the session and reveals the answer.

use chrono::{DateTime, Utc};
use moss_types::{
    ChatHistory, ChatMessage, ChatReply, ChatRole, ChatState, MessageId, Mood, Mystery,
    MysteryContext, MysteryStatus, MysterySummary,
};

/// Transient assistant line shown while an educational reply is generated.
pub const SEARCHING_PLACEHOLDER: &str = "Searching the docs...";

/// Canned reply when the creature's mood is unknown.
pub const GENERIC_FALLBACK: &str = "*tilts head* ...hi there! I got a bit distracted, say that again?";

/// Append a message and return its id.
pub fn push_message(
    state: &mut ChatState,
    role: ChatRole,
    content: impl Into<String>,
    now: DateTime<Utc>,
) -> MessageId {
    let id = MessageId::new();
    state.messages.push(ChatMessage {
        id,
        role,
        content: content.into(),
        timestamp: now,
    });
    id
}

/// Overwrite a message in place, or append when the id is gone.
pub fn replace_message(
    state: &mut ChatState,
    id: MessageId,
    role: ChatRole,
    content: impl Into<String>,
    now: DateTime<Utc>,
) -> MessageId {
    let content = content.into();
    if let Some(message) = state.messages.iter_mut().find(|m| m.id == id) {
        message.content = content;
        message.timestamp = now;
        return id;
    }
    push_message(state, role, content, now)
}

/// Begin a mystery, replacing any active one, and present its intro.
pub fn start_mystery(state: &mut ChatState, mystery: &Mystery, now: DateTime<Utc>) -> MessageId {
    state.active_mystery = Some(mystery.clone());
    state.mystery_progress = 0;
    state.hints_given.clear();
    push_message(state, ChatRole::Assistant, mystery.intro.clone(), now)
}

fn clear_mystery(state: &mut ChatState) {
    state.active_mystery = None;
    state.mystery_progress = 0;
    state.hints_given.clear();
}

fn reveal(solution: &str) -> String {
    format!(
        "\n\n*wiggles sympathetically*\nThe answer was: {solution}\n\nNice try! Want to try another mystery?"
    )
}

/// Mystery context for a generation request.
pub fn mystery_context(state: &ChatState) -> Option<MysteryContext> {
    let mystery = state.active_mystery.as_ref()?;
    Some(MysteryContext {
        title: mystery.title.clone(),
        intro: mystery.intro.clone(),
        hints_given: state.hints_given.clone(),
        next_hint: mystery.hints.get(state.mystery_progress).cloned(),
        progress: state.mystery_progress,
        total_hints: mystery.hints.len(),
        solution: mystery.solution.clone(),
    })
}

/// Fold a generated reply into the session and return the text to show.
pub fn apply_reply(state: &mut ChatState, reply: &ChatReply) -> String {
    let mut text = reply.response.clone();
    let Some(mystery) = state.active_mystery.clone() else {
        return text;
    };
    let total = mystery.hints.len();
    state.mystery_progress = state.mystery_progress.min(total);

    let update = reply.mystery_update.clone().unwrap_or_default();
    let mut hint_given = false;
    if let Some(hint) = update.hint_given
        && state.mystery_progress < total
    {
        state.hints_given.push(hint);
        state.mystery_progress = state.mystery_progress.saturating_add(1);
        hint_given = true;
    }

    if update.solved {
        tracing::info!(mystery = %mystery.id, "mystery solved");
        state.solved.insert(mystery.id);
        clear_mystery(state);
    } else if update.failed || (total > 0 && state.mystery_progress >= total && !hint_given) {
        tracing::info!(mystery = %mystery.id, "mystery failed");
        text.push_str(&reveal(&mystery.solution));
        clear_mystery(state);
    }
    text
}

/// Canned reply used when generation is unavailable.
pub const fn fallback_reply(mood: Option<Mood>) -> &'static str {
    match mood {
        None => GENERIC_FALLBACK,
        Some(Mood::Happy) => "*bounces* I'm so happy you're here! Tell me more!",
        Some(Mood::Neutral) => "*nods thoughtfully* hmm, interesting...",
        Some(Mood::Hungry) => "*stomach growls* sorry, hard to think on an empty tummy...",
        Some(Mood::Sad) => "*sniffles* ...I'm listening, just a little down right now.",
        Some(Mood::Lonely) => "*scoots closer* I'm just glad you're talking to me.",
        Some(Mood::Critical) => "*wobbles weakly* ...I need some care before I can chat...",
        Some(Mood::Sleeping) => "*zzz* ...mmm... talk... later...",
        Some(Mood::Tun) => "*the curled-up ball says nothing*",
    }
}

/// Projection for the mystery-status query.
pub fn mystery_status(state: &ChatState) -> MysteryStatus {
    state
        .active_mystery
        .as_ref()
        .map_or_else(MysteryStatus::default, |mystery| MysteryStatus {
            active: true,
            mystery: Some(MysterySummary::from(mystery)),
            progress: state.mystery_progress,
            hints_given: state.hints_given.clone(),
            total_hints: mystery.hints.len(),
        })
}

/// Projection for the chat-history query.
pub fn history(state: &ChatState) -> ChatHistory {
    ChatHistory {
        messages: state.messages.clone(),
        mystery_status: mystery_status(state),
        is_typing: state.is_typing,
    }
}

/// State handed to the next instance: the last `keep` messages plus the
/// whole mystery session and solved set.
pub fn carry_over(state: &ChatState, keep: usize) -> ChatState {
    let skip = state.messages.len().saturating_sub(keep);
    ChatState {
        messages: state.messages.iter().skip(skip).cloned().collect(),
        active_mystery: state.active_mystery.clone(),
        mystery_progress: state.mystery_progress,
        hints_given: state.hints_given.clone(),
        solved: state.solved.clone(),
        is_typing: false,
    }
}
