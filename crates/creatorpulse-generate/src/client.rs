use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::GenerateError;
use crate::prompt::ComposedPrompt;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Thin client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct GeneratorClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl GeneratorClient {
    pub fn new(api_key: String, model: String, timeout_secs: u64) -> Result<Self, GenerateError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL.to_string())
    }

    /// Same as [`Self::new`] but pointed at a custom endpoint. Tests use
    /// this to target a mock server.
    pub fn with_base_url(
        api_key: String,
        model: String,
        timeout_secs: u64,
        base_url: String,
    ) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(GenerateError::UpstreamHttp)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            timeout_secs,
        })
    }

    /// Sends a composed prompt and returns the first completion's text.
    pub async fn generate(&self, prompt: &ComposedPrompt) -> Result<String, GenerateError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user },
            ],
            "temperature": prompt.temperature,
            "max_tokens": prompt.max_tokens,
        });

        debug!(model = %self.model, max_tokens = prompt.max_tokens, "sending generation request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GenerateError::UpstreamTimeout(self.timeout_secs)
                } else {
                    GenerateError::UpstreamHttp(err)
                }
            })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerateError::UpstreamRateLimited);
        }
        let response = response
            .error_for_status()
            .map_err(GenerateError::UpstreamHttp)?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| GenerateError::UpstreamMalformed(err.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerateError::UpstreamMalformed("response contained no choices".into()))?;

        Ok(content.trim().to_string())
    }
}
