//! Upstream vendor clients and their process-wide cache.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tokio::sync::Mutex;

use crate::auth::ApiKeyProvider;
use crate::defaults;
use crate::error::ChatError;

/// A slot that holds at most one client, built on first use.
///
/// Initialisation is single-flight: the first caller runs `init` while holding
/// the slot lock and concurrent callers wait for it and then share the result.
/// A failed initialisation leaves the slot empty so a later call may retry.
#[derive(Debug)]
pub struct LazyClient<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> Default for LazyClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LazyClient<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<Arc<T>, ChatError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ChatError>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }
        let client = Arc::new(init().await?);
        *slot = Some(Arc::clone(&client));
        Ok(client)
    }

    /// The cached client, without initialising.
    pub async fn get(&self) -> Option<Arc<T>> {
        self.slot.lock().await.clone()
    }

    pub async fn is_initialized(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    /// Empty the slot, returning the previous client.
    pub async fn reset(&self) -> Option<Arc<T>> {
        self.slot.lock().await.take()
    }
}

/// Where to find credentials and the endpoint for one vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub name: String,
    pub api_key_env: String,
    /// Optional variable overriding `default_base_url`.
    pub base_url_env: Option<String>,
    pub default_base_url: String,
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn deepseek() -> Self {
        Self::custom(
            "DeepSeek",
            "DEEPSEEK_API_KEY",
            Some("DEEPSEEK_API_BASE"),
            defaults::DEEPSEEK_BASE_URL,
        )
    }

    pub fn anthropic() -> Self {
        Self::custom(
            "Anthropic",
            "ANTHROPIC_API_KEY",
            Some("ANTHROPIC_API_BASE"),
            defaults::ANTHROPIC_BASE_URL,
        )
    }

    pub fn custom(
        name: impl Into<String>,
        api_key_env: impl Into<String>,
        base_url_env: Option<&str>,
        default_base_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            api_key_env: api_key_env.into(),
            base_url_env: base_url_env.map(str::to_string),
            default_base_url: default_base_url.into(),
            timeout: defaults::HTTP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn base_url(&self) -> String {
        self.base_url_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.default_base_url.clone())
    }
}

/// Authenticated HTTP client for one vendor.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    name: String,
    base_url: String,
    api_key: Arc<SecretString>,
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: SecretString,
        http: reqwest::Client,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            api_key: Arc::new(api_key),
            http,
        }
    }

    /// Build from the environment. A missing key is a configuration error
    /// naming the variable.
    pub async fn from_config(config: &UpstreamConfig) -> Result<Self, ChatError> {
        let api_key = ApiKeyProvider::from_env(&config.api_key_env)
            .resolve()
            .await?
            .ok_or_else(|| ChatError::not_configured(&config.api_key_env))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ChatError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
            })?;

        let base_url = config.base_url();
        tracing::debug!(vendor = %config.name, %base_url, "initialised upstream client");
        Ok(Self::new(config.name.clone(), base_url, api_key, http))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// `base_url` joined with `path`, with exactly one slash between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
