//! Generation backend configuration, read from the environment.
//!
//! The creature runs without any backend at all; a missing primary
//! backend is reported as an error so the caller can log it and switch to
//! the offline service.

use std::time::Duration;

use crate::error::GenerationError;

/// Default per-call deadline in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default output budget for pool generation.
const DEFAULT_POOL_MAX_TOKENS: u32 = 4096;
/// Default output budget for chat replies.
const DEFAULT_CHAT_MAX_TOKENS: u32 = 1024;

/// Complete generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Backend tried first.
    pub primary_backend: LlmBackendConfig,
    /// Backend tried after the primary fails.
    pub secondary_backend: Option<LlmBackendConfig>,
    /// Deadline for a single backend call.
    pub timeout: Duration,
    /// Directory with template overrides, if any.
    pub templates_dir: Option<String>,
    /// Output budget for pool generation.
    pub pool_max_tokens: u32,
    /// Output budget for chat replies.
    pub chat_max_tokens: u32,
}

/// Configuration for a single LLM backend.
#[derive(Debug, Clone)]
pub struct LlmBackendConfig {
    /// The wire protocol to speak.
    pub backend_type: BackendType,
    /// Base API URL (e.g. `https://api.openai.com/v1`).
    pub api_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

/// Supported LLM backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// `OpenAI`-compatible API (works with `OpenAI`, `DeepSeek`, Ollama).
    OpenAi,
    /// Anthropic Messages API.
    Anthropic,
}

impl GeneratorConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GEN_DEFAULT_BACKEND`, `GEN_DEFAULT_API_URL`, `GEN_DEFAULT_API_KEY`,
    ///   `GEN_DEFAULT_MODEL`
    ///
    /// Optional:
    /// - `GEN_SECONDARY_*` -- same four keys for a second backend
    /// - `GEN_TIMEOUT_MS` -- per-call deadline (default 30000)
    /// - `GEN_TEMPLATES_DIR` -- directory with template overrides
    /// - `GEN_POOL_MAX_TOKENS`, `GEN_CHAT_MAX_TOKENS`
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if the primary backend is
    /// missing or a value does not parse.
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`GeneratorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GenerationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let primary_backend = load_backend_config(&lookup, "GEN_DEFAULT")?;

        let secondary_backend = match load_backend_config(&lookup, "GEN_SECONDARY") {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::debug!(error = %e, "no secondary generation backend");
                None
            }
        };

        let timeout_ms: u64 = parse_or(&lookup, "GEN_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;
        let pool_max_tokens = parse_or(&lookup, "GEN_POOL_MAX_TOKENS", DEFAULT_POOL_MAX_TOKENS)?;
        let chat_max_tokens = parse_or(&lookup, "GEN_CHAT_MAX_TOKENS", DEFAULT_CHAT_MAX_TOKENS)?;

        Ok(Self {
            primary_backend,
            secondary_backend,
            timeout: Duration::from_millis(timeout_ms),
            templates_dir: lookup("GEN_TEMPLATES_DIR").filter(|dir| !dir.is_empty()),
            pool_max_tokens,
            chat_max_tokens,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, GenerationError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| GenerationError::Config(format!("invalid {name}: {e}")))
    })
}

fn required<F>(lookup: &F, name: &str) -> Result<String, GenerationError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| GenerationError::Config(format!("missing required env var {name}")))
}

/// Load a backend from a set of prefixed keys.
fn load_backend_config<F>(lookup: &F, prefix: &str) -> Result<LlmBackendConfig, GenerationError>
where
    F: Fn(&str) -> Option<String>,
{
    let backend_str = required(lookup, &format!("{prefix}_BACKEND"))?;
    let api_url = required(lookup, &format!("{prefix}_API_URL"))?;
    let api_key = required(lookup, &format!("{prefix}_API_KEY"))?;
    let model = required(lookup, &format!("{prefix}_MODEL"))?;

    let backend_type = match backend_str.to_lowercase().as_str() {
        "openai" | "deepseek" | "ollama" => BackendType::OpenAi,
        "anthropic" | "claude" => BackendType::Anthropic,
        other => {
            return Err(GenerationError::Config(format!(
                "unknown backend type: {other}"
            )));
        }
    };

    Ok(LlmBackendConfig {
        backend_type,
        api_url: api_url.trim_end_matches('/').to_owned(),
        api_key,
        model,
    })
}
