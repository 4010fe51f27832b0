//! Echo adapters for vendors whose pipelines are not wired yet.

use async_trait::async_trait;
use palaver_core::utils::{IdGenerator, Lifecycle};

use crate::error::ChatError;
use crate::traits::{ChatProvider, SendRequest};
use crate::types::{Message, MessageSender, ProviderId};

/// How a stub phrases its echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubStyle {
    /// `"<Label> (stub): <input>"`
    Echo,
    /// `"<Label> (voice pipeline stub): <input>"`
    VoicePipeline,
}

impl StubStyle {
    fn render(self, label: &str, input: &str) -> String {
        match self {
            Self::Echo => format!("{label} (stub): {input}"),
            Self::VoicePipeline => format!("{label} (voice pipeline stub): {input}"),
        }
    }
}

/// Placeholder adapter that echoes the input back.
#[derive(Debug)]
pub struct StubProvider {
    id: ProviderId,
    label: String,
    supports_voice: bool,
    style: StubStyle,
    ids: IdGenerator,
    lifecycle: Lifecycle,
}

macro_rules! stub_constructor {
    ($name:ident, $id:ident, $label:literal, $voice:literal, $style:ident) => {
        pub fn $name() -> Self {
            Self::new(ProviderId::$id, $label, $voice, StubStyle::$style)
        }
    };
}

impl StubProvider {
    pub fn new(
        id: impl Into<ProviderId>,
        label: impl Into<String>,
        supports_voice: bool,
        style: StubStyle,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            supports_voice,
            style,
            ids: IdGenerator::new("resp"),
            lifecycle: Lifecycle::new(),
        }
    }

    palaver_for_each_stub_provider!(stub_constructor);

    /// All placeholder adapters, in registration order.
    pub fn all() -> Vec<Self> {
        let mut out = Vec::new();
        macro_rules! push {
            ($name:ident, $id:ident, $label:literal, $voice:literal, $style:ident) => {
                out.push(Self::$name());
            };
        }
        palaver_for_each_stub_provider!(push);
        out
    }

    pub fn style(&self) -> StubStyle {
        self.style
    }
}

#[async_trait]
impl ChatProvider for StubProvider {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn supports_voice(&self) -> bool {
        self.supports_voice
    }

    async fn send_message(&self, request: SendRequest<'_>) -> Result<Message, ChatError> {
        self.lifecycle.ensure_active(self.id.as_str())?;
        Ok(Message::new(
            self.ids.next_id(),
            MessageSender::Avatar,
            self.style.render(&self.label, request.input),
        )
        .with_provider(self.id.clone()))
    }

    async fn teardown(&self) -> Result<(), ChatError> {
        if self.lifecycle.tear_down() {
            tracing::debug!(provider = %self.id, "adapter torn down");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn text_stub_echoes_with_label() {
        let provider = StubProvider::deepseek();
        let msg = provider
            .send_message(SendRequest::new(&[], "hello"))
            .await
            .unwrap();

        assert_eq!(msg.content, "DeepSeek (stub): hello");
        assert_eq!(msg.sender, MessageSender::Avatar);
        assert_eq!(msg.provider.as_ref().unwrap(), "deepseek");
        assert!(msg.id.starts_with("resp_"));
        assert!(!provider.supports_voice());
    }

    #[tokio::test]
    async fn voice_stub_uses_pipeline_wording() {
        let msg = StubProvider::vapi()
            .send_message(SendRequest::new(&[], "call me"))
            .await
            .unwrap();
        assert_eq!(msg.content, "Vapi (voice pipeline stub): call me");
    }

    #[tokio::test]
    async fn history_is_left_alone() {
        let history = vec![Message::new("m0", MessageSender::Client, "earlier")];
        let provider = StubProvider::claude();
        provider
            .send_message(SendRequest::new(&history, "now"))
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "earlier");
    }

    #[tokio::test]
    async fn send_after_teardown_fails_loudly() {
        let provider = StubProvider::heygen();
        provider.teardown().await.unwrap();
        provider.teardown().await.unwrap();

        let err = provider
            .send_message(SendRequest::new(&[], "hi"))
            .await
            .unwrap_err();
        assert_eq!(err, ChatError::AdapterTornDown("heygen".into()));
    }

    #[test]
    fn catalogue_flags() {
        let voice: Vec<_> = StubProvider::all()
            .into_iter()
            .filter(|p| p.supports_voice())
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(voice, vec!["elevenlabs", "vapi", "heygen"]);
    }
}
