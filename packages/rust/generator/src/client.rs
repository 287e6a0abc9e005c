//! OpenAI-compatible chat completions client.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use topicpress_shared::{ApiKey, GenerationConfig, Result, TopicPressError};

use crate::{CompletionRequest, TextCompletion};

/// User-Agent string for generation requests.
const USER_AGENT: &str = concat!("TopicPress/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an error body kept in error messages.
const ERROR_BODY_LIMIT: usize = 300;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for `POST {base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    endpoint: Url,
    api_key: ApiKey,
    model: String,
}

impl OpenAiClient {
    /// Build a client from the generation config and a resolved key.
    pub fn new(config: &GenerationConfig, api_key: ApiKey) -> Result<Self> {
        let base = config.parsed_base_url()?;
        let endpoint = chat_endpoint(&base)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TopicPressError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            api_key,
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip_all, fields(model = %self.model, max_tokens = request.max_tokens))]
    async fn send(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| TopicPressError::Network(format!("{}: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TopicPressError::Generation(format!(
                "HTTP {status}: {}",
                truncate(&text, ERROR_BODY_LIMIT)
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| TopicPressError::parse(format!("invalid completion response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| TopicPressError::parse("response contained no choices"))?;

        debug!(chars = content.len(), "completion received");
        Ok(content)
    }
}

impl TextCompletion for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> impl Future<Output = Result<String>> + Send {
        self.send(request)
    }
}

/// Append `chat/completions` to the base URL, keeping any path prefix.
fn chat_endpoint(base: &Url) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("chat/completions")
        .map_err(|e| TopicPressError::config(format!("invalid completions endpoint: {e}")))
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
