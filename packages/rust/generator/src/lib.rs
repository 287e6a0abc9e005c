//! Content requester: turns one topic descriptor into generated prose.
//!
//! The generation service sits behind the narrow [`TextCompletion`] trait.
//! [`ContentRequester`] builds the prompt, makes exactly one call, and folds
//! every failure into a [`GenerationFailure`] so a batch never aborts on a
//! single bad item.

mod client;
pub mod prompt;

use std::future::Future;

use tracing::{debug, instrument, warn};

use topicpress_shared::{GenerationConfig, PageStyle, Result, TopicDescriptor};

pub use client::OpenAiClient;

/// One completion call: persona, instructions, and sampling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A text-completion service.
pub trait TextCompletion: Send + Sync {
    /// Return the generated text for `request`.
    fn complete(&self, request: &CompletionRequest)
    -> impl Future<Output = Result<String>> + Send;
}

/// A topic whose content could not be generated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to generate '{title}': {reason}")]
pub struct GenerationFailure {
    pub output_id: String,
    pub title: String,
    pub reason: String,
}

impl GenerationFailure {
    fn new(topic: &TopicDescriptor, reason: impl Into<String>) -> Self {
        Self {
            output_id: topic.output_id.clone(),
            title: topic.title.clone(),
            reason: reason.into(),
        }
    }
}

/// Fixed settings applied to every request of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSettings {
    pub style: PageStyle,
    /// Subject noun interpolated into prompts (e.g. "wildfire").
    pub subject: String,
    pub persona: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl RequestSettings {
    /// Resolve settings: config overrides first, then style defaults.
    pub fn from_config(config: &GenerationConfig, style: PageStyle, subject: &str) -> Self {
        Self {
            style,
            subject: subject.to_string(),
            persona: config
                .persona
                .clone()
                .unwrap_or_else(|| prompt::default_persona(style, subject)),
            max_tokens: config.max_tokens.unwrap_or_else(|| style.default_max_tokens()),
            temperature: config.temperature,
        }
    }
}

/// Requests generated prose for topics, one service call per topic.
#[derive(Debug, Clone)]
pub struct ContentRequester<C> {
    client: C,
    settings: RequestSettings,
}

impl<C: TextCompletion> ContentRequester<C> {
    pub fn new(client: C, settings: RequestSettings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &RequestSettings {
        &self.settings
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// The exact request that [`request`](Self::request) sends for `topic`.
    pub fn completion_request(&self, topic: &TopicDescriptor) -> CompletionRequest {
        CompletionRequest {
            system: self.settings.persona.clone(),
            prompt: prompt::build_prompt(self.settings.style, &self.settings.subject, topic),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }

    /// Generate prose for one topic.
    ///
    /// Never retries. Transport errors, service errors, and blank output all
    /// come back as a [`GenerationFailure`] carrying the topic title.
    #[instrument(skip_all, fields(output_id = %topic.output_id))]
    pub async fn request(
        &self,
        topic: &TopicDescriptor,
    ) -> std::result::Result<String, GenerationFailure> {
        let request = self.completion_request(topic);

        match self.client.complete(&request).await {
            Ok(text) if text.trim().is_empty() => {
                warn!(title = %topic.title, "generation returned empty text");
                Err(GenerationFailure::new(topic, "service returned empty text"))
            }
            Ok(text) => {
                debug!(chars = text.len(), "content generated");
                Ok(text)
            }
            Err(e) => {
                warn!(title = %topic.title, error = %e, "content generation failed");
                Err(GenerationFailure::new(topic, e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use topicpress_shared::TopicPressError;

    /// Records requests and replays a fixed answer.
    struct Scripted {
        answer: std::result::Result<String, String>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl Scripted {
        fn ok(text: &str) -> Self {
            Self {
                answer: Ok(text.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn err(msg: &str) -> Self {
            Self {
                answer: Err(msg.into()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextCompletion for Scripted {
        fn complete(
            &self,
            request: &CompletionRequest,
        ) -> impl Future<Output = Result<String>> + Send {
            self.seen.lock().unwrap().push(request.clone());
            let answer = self
                .answer
                .clone()
                .map_err(TopicPressError::Generation);
            async move { answer }
        }
    }

    fn topic() -> TopicDescriptor {
        TopicDescriptor {
            output_id: "hysplit".into(),
            title: "HYSPLIT - Atmospheric Transport Model".into(),
            category: "Smoke and Air Quality".into(),
            focus: "smoke dispersion, trajectory analysis".into(),
            description: None,
            organization: Some("NOAA".into()),
            model_type: Some("Atmospheric model".into()),
        }
    }

    fn settings() -> RequestSettings {
        RequestSettings::from_config(&GenerationConfig::default(), PageStyle::Model, "wildfire")
    }

    #[tokio::test]
    async fn request_returns_text_verbatim() {
        let requester = ContentRequester::new(Scripted::ok("  ## Overview\n"), settings());
        let text = requester.request(&topic()).await.unwrap();
        assert_eq!(text, "  ## Overview\n");
    }

    #[tokio::test]
    async fn request_makes_exactly_one_call() {
        let requester = ContentRequester::new(Scripted::err("boom"), settings());
        let _ = requester.request(&topic()).await;
        assert_eq!(requester.client.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn service_error_becomes_failure_with_title() {
        let requester = ContentRequester::new(Scripted::err("HTTP 401"), settings());
        let failure = requester.request(&topic()).await.unwrap_err();
        assert_eq!(failure.title, "HYSPLIT - Atmospheric Transport Model");
        assert_eq!(failure.output_id, "hysplit");
        assert!(failure.reason.contains("HTTP 401"));
    }

    #[tokio::test]
    async fn blank_text_is_a_failure() {
        let requester = ContentRequester::new(Scripted::ok(" \n\t"), settings());
        let failure = requester.request(&topic()).await.unwrap_err();
        assert!(failure.reason.contains("empty"));
    }

    #[tokio::test]
    async fn request_carries_settings() {
        let requester = ContentRequester::new(Scripted::ok("text"), settings());
        requester.request(&topic()).await.unwrap();

        let seen = requester.client.seen.lock().unwrap();
        assert_eq!(seen[0].max_tokens, 2500);
        assert!((seen[0].temperature - 0.7).abs() < f32::EPSILON);
        assert!(seen[0].system.contains("wildfire"));
        assert!(seen[0].prompt.contains("- Organization: NOAA"));
    }

    #[test]
    fn config_overrides_style_defaults() {
        let config = GenerationConfig {
            max_tokens: Some(1234),
            persona: Some("You are terse.".into()),
            temperature: 0.2,
            ..GenerationConfig::default()
        };
        let settings = RequestSettings::from_config(&config, PageStyle::Guide, "wildfire");
        assert_eq!(settings.max_tokens, 1234);
        assert_eq!(settings.persona, "You are terse.");
        assert!((settings.temperature - 0.2).abs() < f32::EPSILON);

        let defaults =
            RequestSettings::from_config(&GenerationConfig::default(), PageStyle::Guide, "wildfire");
        assert_eq!(defaults.max_tokens, 3000);
    }
}
