//! Chat adapter contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::types::{Message, ProviderId, SendOptions};

/// Input to [`ChatProvider::send_message`].
///
/// History is borrowed so adapters can read prior turns but never modify them.
#[derive(Debug, Clone)]
pub struct SendRequest<'a> {
    pub history: &'a [Message],
    pub input: &'a str,
    pub options: SendOptions,
}

impl<'a> SendRequest<'a> {
    pub fn new(history: &'a [Message], input: &'a str) -> Self {
        Self {
            history,
            input,
            options: SendOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SendOptions) -> Self {
        self.options = options;
        self
    }
}

/// Display data for an adapter, suitable for provider pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: ProviderId,
    pub label: String,
    pub supports_voice: bool,
}

/// One chat or voice backend behind a uniform call shape.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Stable id, unique within a registry.
    fn id(&self) -> &str;

    fn label(&self) -> &str;

    fn supports_voice(&self) -> bool {
        false
    }

    /// Produce exactly one new message for `request`.
    async fn send_message(&self, request: SendRequest<'_>) -> Result<Message, ChatError>;

    /// Release adapter-held resources. Must be safe to call repeatedly.
    async fn teardown(&self) -> Result<(), ChatError> {
        Ok(())
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: ProviderId::from(self.id()),
            label: self.label().to_string(),
            supports_voice: self.supports_voice(),
        }
    }
}
