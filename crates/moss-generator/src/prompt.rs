//! Prompt templates rendered with `minijinja`.
//!
//! The four templates ship inside the binary. An operator can point
//! `GEN_TEMPLATES_DIR` at a directory holding any of `pool_system.j2`,
//! `pool_user.j2`, `chat_system.j2` or `chat_user.j2` to override them
//! without recompiling.

use std::path::Path;

use minijinja::Environment;
use moss_types::{Category, ChatRequest, ChatRole, PoolRequest};

use crate::error::GenerationError;

/// Lines requested per category in a generated pool.
pub const LINES_PER_CATEGORY: usize = 10;

const TEMPLATES: [(&str, &str); 4] = [
    ("pool_system", include_str!("../templates/pool_system.j2")),
    ("pool_user", include_str!("../templates/pool_user.j2")),
    ("chat_system", include_str!("../templates/chat_system.j2")),
    ("chat_user", include_str!("../templates/chat_user.j2")),
];

/// Holds the loaded prompt templates.
pub struct PromptEngine {
    env: Environment<'static>,
}

/// A rendered prompt ready to send to an LLM backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System message.
    pub system: String,
    /// User message.
    pub user: String,
}

impl PromptEngine {
    /// Engine with the built-in templates only.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Template`] if a built-in template does
    /// not compile.
    pub fn builtin() -> Result<Self, GenerationError> {
        Self::load(None)
    }

    /// Engine with built-in templates, overridden by any matching file in
    /// `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Template`] if an override cannot be read
    /// or a template does not compile.
    pub fn with_overrides(dir: &Path) -> Result<Self, GenerationError> {
        Self::load(Some(dir))
    }

    fn load(dir: Option<&Path>) -> Result<Self, GenerationError> {
        let mut env = Environment::new();
        for (name, builtin) in TEMPLATES {
            let source = match dir.map(|d| d.join(format!("{name}.j2"))) {
                Some(path) if path.is_file() => {
                    tracing::info!(template = name, path = %path.display(), "using template override");
                    std::fs::read_to_string(&path).map_err(|e| {
                        GenerationError::Template(format!("failed to read {}: {e}", path.display()))
                    })?
                }
                _ => builtin.to_owned(),
            };
            env.add_template_owned(name, source).map_err(|e| {
                GenerationError::Template(format!("failed to add {name} template: {e}"))
            })?;
        }
        Ok(Self { env })
    }

    fn render_one(&self, name: &str, ctx: &serde_json::Value) -> Result<String, GenerationError> {
        self.env
            .get_template(name)
            .map_err(|e| GenerationError::Template(format!("missing {name} template: {e}")))?
            .render(ctx)
            .map_err(|e| GenerationError::Template(format!("{name} render failed: {e}")))
    }

    /// Render the pool-generation prompt.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Template`] if rendering fails.
    pub fn render_pool(&self, request: &PoolRequest) -> Result<RenderedPrompt, GenerationError> {
        let categories: Vec<serde_json::Value> = Category::ALL
            .iter()
            .map(|c| serde_json::json!({"name": c.as_str(), "about": describe(*c)}))
            .collect();
        let ctx = serde_json::json!({
            "personality": request.personality.as_str(),
            "stage": request.stage.as_str(),
            "bond_description": request.bond_description,
            "lines_per_category": LINES_PER_CATEGORY,
            "categories": categories,
        });
        Ok(RenderedPrompt {
            system: self.render_one("pool_system", &ctx)?,
            user: self.render_one("pool_user", &ctx)?,
        })
    }

    /// Render the chat prompt.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Template`] if rendering fails.
    pub fn render_chat(&self, request: &ChatRequest) -> Result<RenderedPrompt, GenerationError> {
        let history: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(|m| {
                let speaker = match m.role {
                    ChatRole::User => "Owner",
                    ChatRole::Assistant => "You",
                };
                serde_json::json!({"speaker": speaker, "content": m.content})
            })
            .collect();

        let pet = request.pet.as_ref().map(|p| {
            serde_json::json!({
                "personality": p.personality.as_str(),
                "mood": p.mood.as_str(),
                "stage": p.stage.as_str(),
                "bond": p.bond,
                "bond_description": p.bond_description,
            })
        });

        let mystery = request.mystery.as_ref().map(|m| {
            serde_json::json!({
                "title": m.title,
                "intro": m.intro,
                "hints_given": m.hints_given,
                "next_hint": m.next_hint,
                "progress": m.progress,
                "total_hints": m.total_hints,
                "hints_exhausted": m.progress >= m.total_hints,
                "solution": m.solution,
            })
        });

        let ctx = serde_json::json!({
            "track": request.track.as_str(),
            "pet": pet,
            "mystery": mystery,
            "history": history,
        });
        Ok(RenderedPrompt {
            system: self.render_one("chat_system", &ctx)?,
            user: self.render_one("chat_user", &ctx)?,
        })
    }
}

/// One-line description of when a category is shown.
#[allow(clippy::match_same_arms)]
const fn describe(category: Category) -> &'static str {
    match category {
        Category::FeedSuccess => "fed when hungry or neutral",
        Category::FeedFull => "fed while already full",
        Category::FeedHungry => "fed while very hungry",
        Category::FeedSleeping => "someone tried to feed it while asleep",
        Category::FeedTun => "fed while dried up and dormant (helps revival)",
        Category::FeedCooldown => "fed again too soon",
        Category::PlaySuccess => "played with",
        Category::PlayTired => "too tired to play properly",
        Category::PlayHappy => "played with while already happy",
        Category::PlaySleeping => "someone tried to play while it sleeps",
        Category::PlayTun => "someone tried to play while dormant",
        Category::PlayCooldown => "played with again too soon",
        Category::PetSuccess => "petted",
        Category::PetMaxBond => "petted when the bond is at its peak",
        Category::PetLowMood => "comforted while sad or hungry",
        Category::PetSleeping => "petted while asleep",
        Category::PetTun => "petted while dormant (helps revival)",
        Category::PetCooldown => "petted again too soon",
        Category::Reviving => "waking up from the dormant tun state",
        Category::IdleHappy => "idle chatter when happy",
        Category::IdleNeutral => "idle chatter when content",
        Category::IdleHungry => "idle chatter when hungry",
        Category::IdleSad => "idle chatter when sad",
        Category::IdleLonely => "idle chatter when the bond is low",
        Category::IdleCritical => "idle chatter when health is critical",
        Category::IdleTun => "idle state while dormant",
        Category::IdleSleeping => "sleep talk",
        Category::NeedsFood => "gently asking for food",
        Category::NeedsPlay => "gently asking to play",
        Category::NeedsAffection => "gently asking for attention",
        Category::NeedsCritical => "urgently pleading for care",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use moss_types::{
        ChatMessage, MessageId, Mood, MysteryContext, PetContext, Personality, Stage, Track,
    };

    use super::*;

    fn chat_request(mystery: Option<MysteryContext>, track: Track) -> ChatRequest {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap();
        ChatRequest {
            messages: vec![ChatMessage {
                id: MessageId::new(),
                role: ChatRole::User,
                content: "is it fog?".to_owned(),
                timestamp: at,
            }],
            pet: Some(PetContext {
                personality: Personality::Sassy,
                mood: Mood::Hungry,
                stage: Stage::Teen,
                bond: 35.0,
                bond_description: "new acquaintances".to_owned(),
            }),
            mystery,
            track,
        }
    }

    #[test]
    fn pool_prompt_lists_every_category() {
        let engine = PromptEngine::builtin().unwrap();
        let prompt = engine
            .render_pool(&PoolRequest {
                personality: Personality::Dramatic,
                stage: Stage::Adult,
                bond_description: "close companions".to_owned(),
            })
            .unwrap();
        assert!(prompt.system.contains("JSON"));
        assert!(prompt.user.contains("Personality: dramatic"));
        assert!(prompt.user.contains("close companions"));
        for category in Category::ALL {
            assert!(prompt.user.contains(category.as_str()), "{category}");
        }
    }

    #[test]
    fn chat_prompt_carries_persona_and_history() {
        let engine = PromptEngine::builtin().unwrap();
        let prompt = engine.render_chat(&chat_request(None, Track::Fun)).unwrap();
        assert!(prompt.system.contains("sassy"));
        assert!(prompt.system.contains("hungry"));
        assert!(prompt.user.contains("Owner: is it fog?"));
        assert!(!prompt.user.contains("MYSTERY MODE"));
    }

    #[test]
    fn chat_prompt_includes_next_hint() {
        let engine = PromptEngine::builtin().unwrap();
        let mystery = MysteryContext {
            title: "The Dream Maze".to_owned(),
            intro: "walls of water".to_owned(),
            hints_given: vec!["it floats".to_owned()],
            next_hint: Some("cold mornings".to_owned()),
            progress: 1,
            total_hints: 3,
            solution: "Fog".to_owned(),
        };
        let prompt = engine
            .render_chat(&chat_request(Some(mystery), Track::Fun))
            .unwrap();
        assert!(prompt.user.contains("MYSTERY MODE"));
        assert!(prompt.user.contains("Hints given so far: 1 of 3"));
        assert!(prompt.user.contains("cold mornings"));
        assert!(!prompt.user.contains("All hints are used up"));
    }

    #[test]
    fn educational_system_prompt_drops_persona() {
        let engine = PromptEngine::builtin().unwrap();
        let prompt = engine
            .render_chat(&chat_request(None, Track::Educational))
            .unwrap();
        assert!(prompt.system.contains("teaches"));
        assert!(!prompt.system.contains("sassy"));
    }

    #[test]
    fn override_directory_replaces_one_template() {
        let dir = std::env::temp_dir().join(format!(
            "moss_prompt_override_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        ));
        std::fs::create_dir_all(&dir).ok();
        std::fs::write(dir.join("pool_system.j2"), "custom for {{ personality }}").ok();

        let engine = PromptEngine::with_overrides(&dir).unwrap();
        let prompt = engine
            .render_pool(&PoolRequest {
                personality: Personality::Shy,
                stage: Stage::Baby,
                bond_description: "barely met".to_owned(),
            })
            .unwrap();
        assert_eq!(prompt.system, "custom for shy");
        assert!(prompt.user.contains("Personality: shy"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn broken_override_is_an_error() {
        let dir = std::env::temp_dir().join(format!(
            "moss_prompt_broken_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        ));
        std::fs::create_dir_all(&dir).ok();
        std::fs::write(dir.join("chat_user.j2"), "{% for x in %}").ok();
        assert!(PromptEngine::with_overrides(&dir).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
