//! Id-keyed adapter registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ChatError;
use crate::traits::{ChatProvider, ProviderInfo};

/// Adapters keyed by id.
///
/// Ids are unique: registering a second adapter under an existing id fails
/// with `DuplicateProvider` and leaves the first one in place. Lookups are a
/// single hash probe; listing preserves registration order.
#[derive(Default)]
pub struct ProviderRegistry {
    by_id: HashMap<String, Arc<dyn ChatProvider>>,
    order: Vec<String>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.order)
            .finish()
    }
}

impl ProviderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own id.
    ///
    /// Fails with `DuplicateProvider` if the id is taken.
    pub fn register<P>(&mut self, provider: P) -> Result<(), ChatError>
    where
        P: ChatProvider + 'static,
    {
        self.register_arc(Arc::new(provider))
    }

    /// Same as [`register`](Self::register) for an already shared adapter.
    pub fn register_arc(&mut self, provider: Arc<dyn ChatProvider>) -> Result<(), ChatError> {
        let id = provider.id().to_string();
        if self.by_id.contains_key(&id) {
            return Err(ChatError::DuplicateProvider(id));
        }
        tracing::debug!(provider = %id, voice = provider.supports_voice(), "registered provider");
        self.order.push(id.clone());
        self.by_id.insert(id, provider);
        Ok(())
    }

    /// Remove an adapter without tearing it down.
    pub fn unregister(&mut self, id: &str) -> Option<Arc<dyn ChatProvider>> {
        let removed = self.by_id.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(removed)
    }

    /// Look up an adapter; unknown ids are a `ProviderNotFound` error.
    pub fn get(&self, id: &str) -> Result<Arc<dyn ChatProvider>, ChatError> {
        self.find(id)
            .cloned()
            .ok_or_else(|| ChatError::ProviderNotFound(id.to_string()))
    }

    /// Borrowing lookup; `None` for unknown ids.
    pub fn find(&self, id: &str) -> Option<&Arc<dyn ChatProvider>> {
        self.by_id.get(id)
    }

    /// Whether an adapter is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of registered adapters.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// All adapters in registration order.
    pub fn list(&self) -> Vec<Arc<dyn ChatProvider>> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id).cloned())
            .collect()
    }

    /// Id, label and voice flag of every adapter, in registration order.
    pub fn infos(&self) -> Vec<ProviderInfo> {
        self.list().iter().map(|p| p.info()).collect()
    }

    /// Adapters usable for voice-oriented turns.
    pub fn voice_providers(&self) -> Vec<Arc<dyn ChatProvider>> {
        self.list()
            .into_iter()
            .filter(|p| p.supports_voice())
            .collect()
    }

    /// Adapters without voice support.
    pub fn text_providers(&self) -> Vec<Arc<dyn ChatProvider>> {
        self.list()
            .into_iter()
            .filter(|p| !p.supports_voice())
            .collect()
    }

    /// Tear down every adapter. All adapters are attempted; the first error is
    /// returned afterwards.
    pub async fn teardown_all(&self) -> Result<(), ChatError> {
        let mut first_error = None;
        for provider in self.list() {
            if let Err(err) = provider.teardown().await {
                tracing::warn!(provider = provider.id(), error = %err, "teardown failed");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SendRequest;
    use crate::types::{Message, MessageSender};
    use async_trait::async_trait;

    struct Fixed {
        id: &'static str,
        voice: bool,
    }

    #[async_trait]
    impl ChatProvider for Fixed {
        fn id(&self) -> &str {
            self.id
        }

        fn label(&self) -> &str {
            self.id
        }

        fn supports_voice(&self) -> bool {
            self.voice
        }

        async fn send_message(&self, request: SendRequest<'_>) -> Result<Message, ChatError> {
            Ok(Message::new("resp_fixed", MessageSender::Avatar, request.input))
        }
    }

    #[test]
    fn duplicate_ids_are_rejected_and_first_wins() {
        let mut registry = ProviderRegistry::new();
        registry.register(Fixed { id: "a", voice: false }).unwrap();
        let err = registry.register(Fixed { id: "a", voice: true }).unwrap_err();

        assert_eq!(err, ChatError::DuplicateProvider("a".into()));
        assert_eq!(registry.len(), 1);
        assert!(!registry.get("a").unwrap().supports_voice());
    }

    #[test]
    fn unknown_id_is_a_registry_miss() {
        let registry = ProviderRegistry::new();
        let err = registry.get("ghost").err().unwrap();
        assert_eq!(err, ChatError::ProviderNotFound("ghost".into()));
    }

    #[test]
    fn listing_keeps_registration_order_and_splits_by_voice() {
        let mut registry = ProviderRegistry::new();
        registry.register(Fixed { id: "text-b", voice: false }).unwrap();
        registry.register(Fixed { id: "voice-a", voice: true }).unwrap();
        registry.register(Fixed { id: "text-a", voice: false }).unwrap();

        assert_eq!(registry.ids(), vec!["text-b", "voice-a", "text-a"]);
        let voice: Vec<_> = registry
            .voice_providers()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(voice, vec!["voice-a"]);
        assert_eq!(registry.text_providers().len(), 2);
    }

    #[test]
    fn unregister_frees_the_id() {
        let mut registry = ProviderRegistry::new();
        registry.register(Fixed { id: "a", voice: false }).unwrap();
        assert!(registry.unregister("a").is_some());
        assert!(registry.is_empty());
        registry.register(Fixed { id: "a", voice: true }).unwrap();
        assert!(registry.get("a").unwrap().supports_voice());
    }

    struct Brittle;

    #[async_trait]
    impl ChatProvider for Brittle {
        fn id(&self) -> &str {
            "brittle"
        }

        fn label(&self) -> &str {
            "Brittle"
        }

        async fn send_message(&self, _request: SendRequest<'_>) -> Result<Message, ChatError> {
            Err(ChatError::InternalError("unused".into()))
        }

        async fn teardown(&self) -> Result<(), ChatError> {
            Err(ChatError::InternalError("socket already closed".into()))
        }
    }

    #[test]
    fn teardown_all_reports_first_failure() {
        let mut registry = ProviderRegistry::new();
        registry.register(Fixed { id: "a", voice: false }).unwrap();
        registry.register(Brittle).unwrap();

        let err = tokio_test::block_on(registry.teardown_all()).unwrap_err();
        assert_eq!(err, ChatError::InternalError("socket already closed".into()));
    }
}
