//! Per-conversation provider choice.

use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::registry::ProviderRegistry;
use crate::types::ProviderId;

/// Which adapter handles text, voice and streaming-avatar turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSelection {
    text_mode: ProviderId,
    voice_mode: ProviderId,
    streaming_mode: ProviderId,
}

impl Default for ProviderSelection {
    fn default() -> Self {
        Self {
            text_mode: ProviderId::POLLINATIONS.into(),
            voice_mode: ProviderId::ELEVENLABS.into(),
            streaming_mode: ProviderId::HEYGEN.into(),
        }
    }
}

impl ProviderSelection {
    pub fn text_mode(&self) -> &ProviderId {
        &self.text_mode
    }

    pub fn voice_mode(&self) -> &ProviderId {
        &self.voice_mode
    }

    pub fn streaming_mode(&self) -> &ProviderId {
        &self.streaming_mode
    }

    pub fn set_text_mode(
        &mut self,
        registry: &ProviderRegistry,
        id: &str,
    ) -> Result<(), ChatError> {
        registry.get(id)?;
        self.text_mode = id.into();
        Ok(())
    }

    /// Voice turns need an adapter with voice support.
    pub fn set_voice_mode(
        &mut self,
        registry: &ProviderRegistry,
        id: &str,
    ) -> Result<(), ChatError> {
        let provider = registry.get(id)?;
        if !provider.supports_voice() {
            return Err(ChatError::ValidationError(format!(
                "{} does not support voice",
                provider.label()
            )));
        }
        self.voice_mode = id.into();
        Ok(())
    }

    pub fn set_streaming_mode(
        &mut self,
        registry: &ProviderRegistry,
        id: &str,
    ) -> Result<(), ChatError> {
        registry.get(id)?;
        self.streaming_mode = id.into();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ChatProvider, SendRequest};
    use crate::types::{Message, MessageSender};
    use async_trait::async_trait;

    struct Stub {
        id: &'static str,
        voice: bool,
    }

    #[async_trait]
    impl ChatProvider for Stub {
        fn id(&self) -> &str {
            self.id
        }

        fn label(&self) -> &str {
            self.id
        }

        fn supports_voice(&self) -> bool {
            self.voice
        }

        async fn send_message(&self, _request: SendRequest<'_>) -> Result<Message, ChatError> {
            Ok(Message::new("x", MessageSender::Avatar, ""))
        }
    }

    fn registry() -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        registry
            .register(Stub {
                id: "deepseek",
                voice: false,
            })
            .unwrap();
        registry
            .register(Stub {
                id: "vapi",
                voice: true,
            })
            .unwrap();
        registry
    }

    #[test]
    fn defaults() {
        let selection = ProviderSelection::default();
        assert_eq!(selection.text_mode(), "pollinations");
        assert_eq!(selection.voice_mode(), "elevenlabs");
        assert_eq!(selection.streaming_mode(), "heygen");
    }

    #[test]
    fn voice_mode_requires_voice_support() {
        let registry = registry();
        let mut selection = ProviderSelection::default();

        let err = selection.set_voice_mode(&registry, "deepseek").unwrap_err();
        assert!(matches!(err, ChatError::ValidationError(_)));
        assert_eq!(selection.voice_mode(), "elevenlabs");

        selection.set_voice_mode(&registry, "vapi").unwrap();
        assert_eq!(selection.voice_mode(), "vapi");
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let registry = registry();
        let mut selection = ProviderSelection::default();

        assert!(matches!(
            selection.set_text_mode(&registry, "ghost"),
            Err(ChatError::ProviderNotFound(_))
        ));
        selection.set_text_mode(&registry, "deepseek").unwrap();
        selection.set_streaming_mode(&registry, "vapi").unwrap();
        assert_eq!(selection.text_mode(), "deepseek");
        assert_eq!(selection.streaming_mode(), "vapi");
    }

    #[test]
    fn serializes_mode_keys_in_camel_case() {
        let json = serde_json::to_value(ProviderSelection::default()).unwrap();
        assert_eq!(json["textMode"], "pollinations");
        assert_eq!(json["streamingMode"], "heygen");
    }
}
