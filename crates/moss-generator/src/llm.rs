//! LLM backends spoken over HTTP.
//!
//! Enum dispatch keeps the backends usable from async code without trait
//! objects. Both send one system and one user message and return the raw
//! text of the first completion.

use crate::config::{BackendType, LlmBackendConfig};
use crate::error::GenerationError;
use crate::prompt::RenderedPrompt;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// An LLM backend that turns a prompt into response text.
pub enum LlmBackend {
    /// OpenAI-compatible chat completions API.
    OpenAi(OpenAiBackend),
    /// Anthropic Messages API.
    Anthropic(AnthropicBackend),
}

impl LlmBackend {
    /// Send a prompt and return the response text.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Backend`] if the HTTP call fails or the
    /// response has no text.
    pub async fn complete(
        &self,
        prompt: &RenderedPrompt,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        match self {
            Self::OpenAi(backend) => backend.complete(prompt, max_tokens).await,
            Self::Anthropic(backend) => backend.complete(prompt, max_tokens).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::OpenAi(_) => "openai-compatible",
            Self::Anthropic(_) => "anthropic",
        }
    }
}

/// Backend for OpenAI-compatible chat completions APIs.
///
/// Sends requests to `{api_url}/chat/completions`.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    /// Create a new `OpenAI`-compatible backend.
    pub fn new(config: &LlmBackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn complete(
        &self,
        prompt: &RenderedPrompt,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/chat/completions", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": 0.9,
            "max_tokens": max_tokens,
            "response_format": {"type": "json_object"}
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Backend(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(GenerationError::Backend(format!(
                "OpenAI returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            GenerationError::Backend(format!("OpenAI response parse failed: {e}"))
        })?;

        extract_openai_content(&json)
    }
}

fn extract_openai_content(json: &serde_json::Value) -> Result<String, GenerationError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            GenerationError::Backend("OpenAI response missing choices[0].message.content".to_owned())
        })
}

/// Backend for the Anthropic Messages API.
///
/// The system prompt is a top-level field, authentication goes in
/// `x-api-key`, and the text comes back as content blocks.
pub struct AnthropicBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl AnthropicBackend {
    /// Create a new Anthropic Messages API backend.
    pub fn new(config: &LlmBackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn complete(
        &self,
        prompt: &RenderedPrompt,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/messages", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "system": prompt.system,
            "messages": [
                {"role": "user", "content": prompt.user}
            ]
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Backend(format!("Anthropic request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(GenerationError::Backend(format!(
                "Anthropic returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            GenerationError::Backend(format!("Anthropic response parse failed: {e}"))
        })?;

        extract_anthropic_content(&json)
    }
}

/// Concatenate the text blocks of a Messages API response.
fn extract_anthropic_content(json: &serde_json::Value) -> Result<String, GenerationError> {
    let text: String = json
        .get("content")
        .and_then(serde_json::Value::as_array)
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|b| b.get("text").and_then(serde_json::Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::Backend(
            "Anthropic response has no text content".to_owned(),
        ));
    }
    Ok(text)
}

/// Create an LLM backend from configuration.
pub fn create_backend(config: &LlmBackendConfig) -> LlmBackend {
    match config.backend_type {
        BackendType::OpenAi => LlmBackend::OpenAi(OpenAiBackend::new(config)),
        BackendType::Anthropic => LlmBackend::Anthropic(AnthropicBackend::new(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_openai_content_valid() {
        let json = serde_json::json!({
            "choices": [{"message": {"content": "{\"response\": \"*wiggles*\"}"}}]
        });
        let result = extract_openai_content(&json);
        assert!(result.unwrap_or_default().contains("wiggles"));
    }

    #[test]
    fn extract_openai_content_missing_choices() {
        let json = serde_json::json!({"error": "rate_limit"});
        assert!(extract_openai_content(&json).is_err());
    }

    #[test]
    fn extract_anthropic_joins_text_blocks() {
        let json = serde_json::json!({
            "content": [
                {"type": "text", "text": "{\"feedSuccess\": "},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "[\"yum\"]}"}
            ]
        });
        let text = extract_anthropic_content(&json).unwrap_or_default();
        assert_eq!(text, "{\"feedSuccess\": [\"yum\"]}");
    }

    #[test]
    fn extract_anthropic_content_missing() {
        let json = serde_json::json!({"content": []});
        assert!(extract_anthropic_content(&json).is_err());
    }

    #[test]
    fn create_backend_dispatches_correctly() {
        let mut config = LlmBackendConfig {
            backend_type: BackendType::OpenAi,
            api_url: "http://localhost:11434/v1".to_owned(),
            api_key: "test".to_owned(),
            model: "test-model".to_owned(),
        };
        assert_eq!(create_backend(&config).name(), "openai-compatible");

        config.backend_type = BackendType::Anthropic;
        assert_eq!(create_backend(&config).name(), "anthropic");
    }
}
