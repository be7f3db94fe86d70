use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ModelError, ModelSettings, RecommendationClient};
use crate::pipeline::ModelAnswer;

/// Chat-style client for the Hugging Face router (and compatible backends).
/// One POST per call, bearer-authenticated, no retry.
#[derive(Debug, Clone)]
pub struct HfChatClient {
    http: Client,
    settings: ModelSettings,
}

impl HfChatClient {
    pub fn new(settings: ModelSettings) -> Result<Self, ModelError> {
        let http = Client::builder()
            .user_agent("sme-advisor/0.3")
            .build()?;
        Ok(Self { http, settings })
    }
}

#[async_trait]
impl RecommendationClient for HfChatClient {
    async fn recommend(&self, prompt: &str) -> Result<ModelAnswer, ModelError> {
        let payload = ChatRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            model: &self.settings.model,
        };

        let response = self
            .http
            .post(&self.settings.api_url)
            .bearer_auth(&self.settings.api_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let answer = extract_answer(&body)?;
        debug!(package = %answer.package, tools = answer.tooling_stack.len(), "model answered");
        Ok(answer)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    model: &'a str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Two success envelopes are accepted, tried in declaration order: the
/// legacy sequence shape with `generated_text`, then the chat-completion
/// shape. Both carry the three-key answer as a JSON-encoded string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseEnvelope {
    Generated(Vec<GeneratedChunk>),
    Chat(ChatResponse),
}

#[derive(Deserialize)]
struct GeneratedChunk {
    generated_text: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

fn extract_answer(body: &str) -> Result<ModelAnswer, ModelError> {
    let envelope: ResponseEnvelope = serde_json::from_str(body)
        .map_err(|_| ModelError::Format(format!("unexpected response shape: {body}")))?;
    let content = match envelope {
        ResponseEnvelope::Generated(chunks) => chunks
            .into_iter()
            .next()
            .map(|chunk| chunk.generated_text)
            .ok_or_else(|| ModelError::Format("empty generated_text sequence".into()))?,
        ResponseEnvelope::Chat(chat) => chat
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ModelError::Format("chat response has no choices".into()))?,
    };
    let content = strip_json_fences(&content);
    serde_json::from_str(content)
        .map_err(|err| ModelError::Format(format!("invalid answer JSON ({err}): {content}")))
}

/// Strips ```json ... ``` or ``` ... ``` fences some backends wrap around
/// JSON output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match stripped {
        Some(inner) => inner
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or_else(|| inner.trim_start()),
        None => text,
    }
}
