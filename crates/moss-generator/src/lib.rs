//! Client for the external text-generation service.
//!
//! Produces personality-flavoured message pools and chat replies. Every
//! failure is typed and returned; callers decide how to degrade.
//!
//! # Modules
//!
//! - [`config`] -- Backend selection from `GEN_*` environment variables.
//! - [`error`] -- [`GenerationError`].
//! - [`llm`] -- OpenAI-compatible and Anthropic HTTP backends.
//! - [`parse`] -- Recovery chain from raw model text to typed values.
//! - [`prompt`] -- Built-in `minijinja` templates with on-disk overrides.
//! - [`service`] -- [`GenerationService`] and its implementations.
//!
//! [`GenerationError`]: error::GenerationError
//! [`GenerationService`]: service::GenerationService

pub mod config;
pub mod error;
pub mod llm;
pub mod parse;
pub mod prompt;
pub mod service;

pub use error::GenerationError;
pub use service::{GenerationService, Generator, LlmGenerationService, OfflineGenerationService};
