//! OpenAI-compatible chat completions adapter.
//!
//! One adapter type covers every vendor that speaks the `/chat/completions`
//! wire format; [`ChatCompletionsConfig`] carries the per-vendor preset.

use std::time::Duration;

use async_trait::async_trait;
use palaver_core::auth::ApiKeyProvider;
use palaver_core::defaults;
use palaver_core::utils::{IdGenerator, Lifecycle};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChatError;
use crate::traits::{ChatProvider, SendRequest};
use crate::types::{Message, MessageSender, ProviderId};

pub const OPENAI_MODEL: &str = "gpt-4o-mini";
pub const OPENROUTER_MODEL: &str = "openrouter/auto";

/// Vendor preset for [`ChatCompletionsAdapter`].
#[derive(Debug, Clone)]
pub struct ChatCompletionsConfig {
    pub id: ProviderId,
    pub label: String,
    pub base_url: String,
    pub model: String,
    pub api_key: ApiKeyProvider,
    pub timeout: Duration,
}

impl ChatCompletionsConfig {
    pub fn new(
        id: impl Into<ProviderId>,
        label: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: ApiKeyProvider::new(),
            timeout: defaults::HTTP_TIMEOUT,
        }
    }

    /// OpenAI preset. Reads `OPENAI_API_KEY`, and `OPENAI_API_BASE` if set.
    pub fn openai() -> Self {
        Self::new(
            ProviderId::OPENAI,
            "OpenAI",
            base_from_env("OPENAI_API_BASE", defaults::OPENAI_BASE_URL),
            OPENAI_MODEL,
        )
        .with_api_key(ApiKeyProvider::from_env("OPENAI_API_KEY"))
    }

    /// OpenRouter preset. Reads `OPENROUTER_API_KEY`, and `OPENROUTER_API_BASE` if set.
    pub fn openrouter() -> Self {
        Self::new(
            ProviderId::OPENROUTER,
            "OpenRouter",
            base_from_env("OPENROUTER_API_BASE", defaults::OPENROUTER_BASE_URL),
            OPENROUTER_MODEL,
        )
        .with_api_key(ApiKeyProvider::from_env("OPENROUTER_API_KEY"))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: ApiKeyProvider) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn base_from_env(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Value,
}

fn build_messages<'a>(request: &'a SendRequest<'a>) -> Vec<WireMessage<'a>> {
    let mut messages = Vec::with_capacity(request.history.len() + 2);
    if let Some(system) = request.options.system_prompt.as_deref() {
        messages.push(WireMessage {
            role: "system",
            content: system,
        });
    }
    messages.extend(request.history.iter().map(|m| WireMessage {
        role: m.sender.as_chat_role(),
        content: &m.content,
    }));
    messages.push(WireMessage {
        role: "user",
        content: request.input,
    });
    messages
}

/// Flatten `content` that is either a string or an array of text parts.
/// Anything else yields an empty string.
fn extract_content(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| match part {
                Value::String(s) => Some(s.as_str()),
                other => other.get("text").and_then(Value::as_str),
            })
            .collect(),
        _ => String::new(),
    }
}

/// Adapter for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug)]
pub struct ChatCompletionsAdapter {
    config: ChatCompletionsConfig,
    http: reqwest::Client,
    ids: IdGenerator,
    lifecycle: Lifecycle,
}

impl ChatCompletionsAdapter {
    pub fn new(config: ChatCompletionsConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http_client(config, http))
    }

    pub fn with_http_client(config: ChatCompletionsConfig, http: reqwest::Client) -> Self {
        Self {
            config,
            http,
            ids: IdGenerator::new("resp"),
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn openai() -> Result<Self, ChatError> {
        Self::new(ChatCompletionsConfig::openai())
    }

    pub fn openrouter() -> Result<Self, ChatError> {
        Self::new(ChatCompletionsConfig::openrouter())
    }

    pub fn config(&self) -> &ChatCompletionsConfig {
        &self.config
    }
}

#[async_trait]
impl ChatProvider for ChatCompletionsAdapter {
    fn id(&self) -> &str {
        self.config.id.as_str()
    }

    fn label(&self) -> &str {
        &self.config.label
    }

    async fn send_message(&self, request: SendRequest<'_>) -> Result<Message, ChatError> {
        self.lifecycle.ensure_active(self.id())?;
        let api_key = self.config.api_key.require().await?;

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: build_messages(&request),
            seed: request.options.seed,
            response_format: request.options.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        tracing::debug!(
            provider = self.id(),
            model = %self.config.model,
            messages = body.messages.len(),
            "sending chat completion"
        );

        let resp = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            let message = if text.trim().is_empty() {
                format!("{} error: {}", self.config.label, status.as_u16())
            } else {
                text
            };
            return Err(ChatError::api_error(status.as_u16(), message));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;
        let content = parsed
            .choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .map(|message| extract_content(&message.content))
            .unwrap_or_default();

        Ok(Message::new(self.ids.next_id(), MessageSender::Avatar, content)
            .with_provider(self.config.id.clone()))
    }

    async fn teardown(&self) -> Result<(), ChatError> {
        self.lifecycle.tear_down();
        Ok(())
    }
}
