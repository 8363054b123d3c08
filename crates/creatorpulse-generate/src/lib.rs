//! Creator-grounded content generation.
//!
//! Composes prompts from measured creator evidence, calls the upstream
//! chat-completion service, and scores the returned draft against the
//! creator's observed posting style.

mod client;
mod error;
mod orchestrator;
mod prompt;
mod scorer;
mod types;

pub use client::GeneratorClient;
pub use error::GenerateError;
pub use orchestrator::{Orchestrator, OrchestratorSettings};
pub use prompt::{compose_style_prompt, compose_trend_prompt, ComposedPrompt};
pub use scorer::score_consistency;
pub use types::{
    ConsistencyLevel, ConsistencyScore, CreatorSummary, GenerationResult, MetricEvidence,
    MetricStatus, StyleRequest, TrendRequest,
};
