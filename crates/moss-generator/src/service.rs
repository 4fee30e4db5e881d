//! The generation service consumed by the actors.
//!
//! [`GenerationService`] is the narrow request/response contract. The
//! production implementation renders a prompt, tries the primary backend
//! and then the secondary one, each under a deadline, and parses the
//! result. [`OfflineGenerationService`] fails every call.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use moss_types::{ChatReply, ChatRequest, MessagePool, PoolRequest};
use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::llm::{LlmBackend, create_backend};
use crate::parse::{parse_chat, parse_pool};
use crate::prompt::{PromptEngine, RenderedPrompt};

/// Request/response access to generated text.
pub trait GenerationService: Send + Sync + 'static {
    /// Generate a fresh message pool.
    fn generate_pool(
        &self,
        request: &PoolRequest,
    ) -> impl Future<Output = Result<MessagePool, GenerationError>> + Send;

    /// Generate a chat reply.
    fn generate_chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, GenerationError>> + Send;
}

impl<G: GenerationService> GenerationService for Arc<G> {
    fn generate_pool(
        &self,
        request: &PoolRequest,
    ) -> impl Future<Output = Result<MessagePool, GenerationError>> + Send {
        G::generate_pool(self, request)
    }

    fn generate_chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, GenerationError>> + Send {
        G::generate_chat(self, request)
    }
}

/// Generation over one or two LLM backends.
pub struct LlmGenerationService {
    prompts: PromptEngine,
    primary: LlmBackend,
    secondary: Option<LlmBackend>,
    timeout: Duration,
    pool_max_tokens: u32,
    chat_max_tokens: u32,
}

impl LlmGenerationService {
    /// Build the service from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Template`] if the prompt templates do not
    /// load.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let prompts = match &config.templates_dir {
            Some(dir) => PromptEngine::with_overrides(Path::new(dir))?,
            None => PromptEngine::builtin()?,
        };
        Ok(Self {
            prompts,
            primary: create_backend(&config.primary_backend),
            secondary: config.secondary_backend.as_ref().map(create_backend),
            timeout: config.timeout,
            pool_max_tokens: config.pool_max_tokens,
            chat_max_tokens: config.chat_max_tokens,
        })
    }

    /// Try each backend in order under the deadline.
    async fn complete(
        &self,
        prompt: &RenderedPrompt,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        let mut last_error = GenerationError::Backend("no backend attempted".to_owned());
        for backend in std::iter::once(&self.primary).chain(self.secondary.as_ref()) {
            let result = tokio::time::timeout(self.timeout, backend.complete(prompt, max_tokens))
                .await
                .unwrap_or_else(|_| {
                    Err(GenerationError::Timeout {
                        timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    })
                });
            match result {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!(backend = backend.name(), error = %e, "generation backend failed");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

impl GenerationService for LlmGenerationService {
    async fn generate_pool(&self, request: &PoolRequest) -> Result<MessagePool, GenerationError> {
        let prompt = self.prompts.render_pool(request)?;
        let raw = self.complete(&prompt, self.pool_max_tokens).await?;
        let pool = parse_pool(&raw)?;
        info!(
            personality = %request.personality,
            stage = %request.stage,
            covered = pool.covered(),
            "generated message pool"
        );
        Ok(pool)
    }

    async fn generate_chat(&self, request: &ChatRequest) -> Result<ChatReply, GenerationError> {
        let prompt = self.prompts.render_chat(request)?;
        let raw = self.complete(&prompt, self.chat_max_tokens).await?;
        parse_chat(&raw)
    }
}

/// A service with no backend. Every call fails, so every consumer takes
/// its fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerationService;

impl GenerationService for OfflineGenerationService {
    async fn generate_pool(&self, _request: &PoolRequest) -> Result<MessagePool, GenerationError> {
        Err(GenerationError::Offline)
    }

    async fn generate_chat(&self, _request: &ChatRequest) -> Result<ChatReply, GenerationError> {
        Err(GenerationError::Offline)
    }
}

/// The service selected at startup.
pub enum Generator {
    /// Backed by LLM APIs.
    Llm(Box<LlmGenerationService>),
    /// No backend configured.
    Offline(OfflineGenerationService),
}

impl Generator {
    /// Build from the environment, falling back to offline when no usable
    /// backend is configured.
    pub fn from_env() -> Self {
        let built = GeneratorConfig::from_env()
            .and_then(|config| LlmGenerationService::from_config(&config));
        match built {
            Ok(service) => {
                info!("generation service online");
                Self::Llm(Box::new(service))
            }
            Err(e) => {
                warn!(error = %e, "generation service offline, using static content");
                Self::Offline(OfflineGenerationService)
            }
        }
    }

    /// Whether a backend is configured.
    pub const fn is_online(&self) -> bool {
        matches!(self, Self::Llm(_))
    }
}

impl GenerationService for Generator {
    async fn generate_pool(&self, request: &PoolRequest) -> Result<MessagePool, GenerationError> {
        match self {
            Self::Llm(service) => service.generate_pool(request).await,
            Self::Offline(service) => service.generate_pool(request).await,
        }
    }

    async fn generate_chat(&self, request: &ChatRequest) -> Result<ChatReply, GenerationError> {
        match self {
            Self::Llm(service) => service.generate_chat(request).await,
            Self::Offline(service) => service.generate_chat(request).await,
        }
    }
}
