//! API key resolution chain.
//!
//! Sources are consulted in a fixed order: explicit value, custom resolver,
//! environment variable. The first non-empty value wins and later sources are
//! never evaluated. Nothing is cached; every [`ApiKeyProvider::resolve`] call
//! walks the chain again.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use secrecy::{ExposeSecret, SecretString};

use crate::error::ChatError;

type KeyResolver =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Option<String>, ChatError>> + Send + Sync>;

/// Which link of the chain produced a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Explicit,
    Resolver,
    Environment,
}

impl KeySource {
    fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Resolver => "resolver",
            Self::Environment => "environment",
        }
    }
}

/// Resolves a vendor secret from an explicit value, a resolver, or the environment.
#[derive(Clone, Default)]
pub struct ApiKeyProvider {
    api_key: Option<Arc<SecretString>>,
    resolver: Option<KeyResolver>,
    env_var: Option<String>,
}

impl fmt::Debug for ApiKeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyProvider")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("resolver", &self.resolver.as_ref().map(|_| "<fn>"))
            .field("env_var", &self.env_var)
            .finish()
    }
}

impl ApiKeyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that only reads `var` from the environment.
    pub fn from_env(var: impl Into<String>) -> Self {
        Self::new().with_env_var(var)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Arc::new(SecretString::from(api_key.into())));
        self
    }

    /// Install an async resolver, consulted after the explicit key.
    pub fn with_resolver<F, Fut>(mut self, resolver: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<String>, ChatError>> + Send + 'static,
    {
        self.resolver = Some(Arc::new(move || resolver().boxed()));
        self
    }

    /// Install a synchronous resolver.
    pub fn with_sync_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.resolver = Some(Arc::new(move || {
            let value = resolver();
            async move { Ok(value) }.boxed()
        }));
        self
    }

    pub fn with_env_var(mut self, var: impl Into<String>) -> Self {
        self.env_var = Some(var.into());
        self
    }

    pub fn env_var(&self) -> Option<&str> {
        self.env_var.as_deref()
    }

    /// Walk the chain. `Ok(None)` means no source produced a key.
    pub async fn resolve(&self) -> Result<Option<SecretString>, ChatError> {
        Ok(self
            .resolve_with_source()
            .await?
            .map(|(secret, _)| secret))
    }

    /// Like [`resolve`](Self::resolve) but also reports which source won.
    pub async fn resolve_with_source(
        &self,
    ) -> Result<Option<(SecretString, KeySource)>, ChatError> {
        if let Some(key) = &self.api_key {
            let key = key.expose_secret();
            if !key.is_empty() {
                return Ok(Some(found(key.to_string(), KeySource::Explicit)));
            }
        }

        if let Some(resolver) = &self.resolver {
            if let Some(key) = resolver().await?.filter(|k| !k.is_empty()) {
                return Ok(Some(found(key, KeySource::Resolver)));
            }
        }

        if let Some(var) = &self.env_var {
            if let Some(key) = std::env::var(var).ok().filter(|k| !k.is_empty()) {
                return Ok(Some(found(key, KeySource::Environment)));
            }
        }

        tracing::debug!(env_var = ?self.env_var, "no api key source produced a value");
        Ok(None)
    }

    /// Resolve or fail with `MissingApiKey` naming the environment variable.
    pub async fn require(&self) -> Result<SecretString, ChatError> {
        self.resolve().await?.ok_or_else(|| {
            ChatError::MissingApiKey(match &self.env_var {
                Some(var) => format!("{var} is not configured"),
                None => "no api key configured".to_string(),
            })
        })
    }
}

fn found(key: String, source: KeySource) -> (SecretString, KeySource) {
    tracing::debug!(source = source.as_str(), "resolved api key");
    (SecretString::from(key), source)
}
