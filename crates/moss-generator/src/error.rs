//! Error types for the generation client.

/// Errors that can occur while asking for generated text.
///
/// Every consumer treats these as a signal to fall back to static
/// content; none of them is fatal.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Failed to load or render a prompt template.
    #[error("template error: {0}")]
    Template(String),

    /// An LLM backend returned an error or was unreachable.
    #[error("LLM backend error: {0}")]
    Backend(String),

    /// The backend did not answer within the deadline.
    #[error("generation timed out after {timeout_ms} ms")]
    Timeout {
        /// The deadline that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The response could not be turned into the expected shape.
    #[error("response parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// No backend is configured.
    #[error("generation service is offline")]
    Offline,

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
