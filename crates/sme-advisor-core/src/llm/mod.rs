mod settings;

pub mod hf;

use async_trait::async_trait;
use thiserror::Error;

use crate::pipeline::ModelAnswer;

pub use hf::HfChatClient;
pub use settings::ModelSettings;

/// Client abstraction for requesting a package recommendation from a remote
/// text-generation service.
#[async_trait]
pub trait RecommendationClient: Send + Sync {
    /// Send one prompt and extract the structured answer. A single attempt
    /// per call; no retry, no caching.
    async fn recommend(&self, prompt: &str) -> Result<ModelAnswer, ModelError>;
}

/// Errors produced by one model call. Transport and format problems are
/// contained per profile by the batch processor and never abort the run.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The endpoint answered with a non-success status.
    #[error("model endpoint error ({status}): {body}")]
    Transport { status: u16, body: String },

    /// The request never completed (connection, TLS, timeout).
    #[error("failed to reach model endpoint: {0}")]
    Http(#[from] reqwest::Error),

    /// The response matched neither known envelope, or the embedded answer
    /// was not the expected three-key JSON object.
    #[error("unrecognized model response: {0}")]
    Format(String),
}
