//! Dispatch to a chosen provider with availability fallback and a timeout.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use palaver_core::defaults;

use crate::error::ChatError;
use crate::probe::AvailabilityProbe;
use crate::registry::ProviderRegistry;
use crate::traits::SendRequest;
use crate::types::{Message, ProviderId};

/// Fallback order used when the caller does not supply one.
pub const DEFAULT_FALLBACK_ORDER: [&str; 4] = [
    ProviderId::POLLINATIONS,
    ProviderId::HEYGEN,
    ProviderId::GEMINI,
    ProviderId::OPENROUTER,
];

/// Emitted while choosing a provider, e.g. to show a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEvent {
    Unavailable { provider: ProviderId },
    Fallback { from: ProviderId, to: ProviderId },
}

pub type RouteObserver = Arc<dyn Fn(&RouteEvent) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct RouteOptions {
    pub timeout: Duration,
    /// Consult the probe before sending. Ignored when the router has no probe.
    pub check_availability: bool,
    pub fallback_order: Vec<ProviderId>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            timeout: defaults::SEND_TIMEOUT,
            check_availability: true,
            fallback_order: Vec::new(),
        }
    }
}

impl RouteOptions {
    /// Options with [`DEFAULT_FALLBACK_ORDER`] minus `requested`.
    pub fn with_default_fallbacks(requested: &str) -> Self {
        Self {
            fallback_order: DEFAULT_FALLBACK_ORDER
                .iter()
                .filter(|id| **id != requested)
                .map(|id| ProviderId::from(*id))
                .collect(),
            ..Self::default()
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn check_availability(mut self, enabled: bool) -> Self {
        self.check_availability = enabled;
        self
    }

    pub fn fallback_order<I, P>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProviderId>,
    {
        self.fallback_order = order.into_iter().map(Into::into).collect();
        self
    }
}

/// Sends a turn through the registry.
///
/// The returned message is stamped with the provider that answered and, when
/// a fallback was used, the provider originally requested. Adapter errors are
/// returned unchanged; nothing is rendered into a message on the caller's
/// behalf.
#[derive(Clone)]
pub struct ProviderRouter {
    registry: Arc<ProviderRegistry>,
    probe: Option<Arc<dyn AvailabilityProbe>>,
    observer: Option<RouteObserver>,
}

impl fmt::Debug for ProviderRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRouter")
            .field("registry", &self.registry)
            .field("probe", &self.probe.is_some())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl ProviderRouter {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            probe: None,
            observer: None,
        }
    }

    pub fn with_probe(mut self, probe: Arc<dyn AvailabilityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&RouteEvent) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    pub async fn send(
        &self,
        provider_id: &str,
        request: SendRequest<'_>,
        options: &RouteOptions,
    ) -> Result<Message, ChatError> {
        // Unknown ids fail before any probing.
        self.registry.get(provider_id)?;

        let chosen = match (&self.probe, options.check_availability) {
            (Some(probe), true) => self.choose(probe.as_ref(), provider_id, options).await?,
            _ => ProviderId::from(provider_id),
        };
        let provider = self.registry.get(chosen.as_str())?;

        tracing::debug!(provider = %chosen, requested = provider_id, "dispatching turn");
        let message = tokio::time::timeout(options.timeout, provider.send_message(request))
            .await
            .map_err(|_| {
                ChatError::TimeoutError(format!(
                    "{chosen} did not respond within {:?}",
                    options.timeout
                ))
            })??;

        let message = message.with_provider(chosen.clone());
        Ok(if chosen != provider_id {
            message.with_fallback_from(provider_id)
        } else {
            message
        })
    }

    async fn choose(
        &self,
        probe: &dyn AvailabilityProbe,
        requested: &str,
        options: &RouteOptions,
    ) -> Result<ProviderId, ChatError> {
        if probe.is_available(requested).await {
            return Ok(ProviderId::from(requested));
        }

        tracing::warn!(provider = requested, "provider unavailable");
        self.notify(&RouteEvent::Unavailable {
            provider: requested.into(),
        });

        for alt in &options.fallback_order {
            if alt == requested {
                continue;
            }
            if !self.registry.contains(alt.as_str()) {
                tracing::debug!(provider = %alt, "skipping unregistered fallback");
                continue;
            }
            if probe.is_available(alt.as_str()).await {
                tracing::info!(from = requested, to = %alt, "falling back");
                self.notify(&RouteEvent::Fallback {
                    from: requested.into(),
                    to: alt.clone(),
                });
                return Ok(alt.clone());
            }
        }

        Err(ChatError::ProviderUnavailable(requested.to_string()))
    }

    fn notify(&self, event: &RouteEvent) {
        if let Some(observer) = &self.observer {
            observer(event);
        }
    }
}
