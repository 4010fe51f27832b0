//! Conversation messages.

use serde::{Deserialize, Serialize};

use super::ProviderId;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    /// The end user typing into the chat.
    Client,
    /// The assistant side, whichever adapter produced it.
    Avatar,
}

impl MessageSender {
    /// Role name used by OpenAI-style chat APIs.
    pub fn as_chat_role(self) -> &'static str {
        match self {
            Self::Client => "user",
            Self::Avatar => "assistant",
        }
    }
}

/// A file or media reference attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolPartState {
    InputStreaming,
    OutputAvailable,
    OutputError,
}

/// Structured side-channel information rendered next to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPart {
    #[serde(rename = "type")]
    pub kind: String,
    pub state: ToolPartState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_text: Option<String>,
}

impl ToolPart {
    pub fn provider_error(error_text: impl Into<String>) -> Self {
        Self {
            kind: "provider".to_string(),
            state: ToolPartState::OutputError,
            error_text: Some(error_text.into()),
        }
    }
}

/// One turn of a conversation.
///
/// Messages are immutable once an adapter returns them; builders consume
/// `self` so a value is fully assembled before it is handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: MessageSender,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_parts: Vec<ToolPart>,
    /// Set when a router answered from a fallback adapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_from: Option<ProviderId>,
}

impl Message {
    pub fn new(id: impl Into<String>, sender: MessageSender, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sender,
            content: content.into(),
            provider: None,
            attachments: Vec::new(),
            tool_parts: Vec::new(),
            fallback_from: None,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<ProviderId>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_tool_part(mut self, part: ToolPart) -> Self {
        self.tool_parts.push(part);
        self
    }

    pub fn with_fallback_from(mut self, provider: impl Into<ProviderId>) -> Self {
        self.fallback_from = Some(provider.into());
        self
    }

    pub fn is_from_client(&self) -> bool {
        self.sender == MessageSender::Client
    }
}
