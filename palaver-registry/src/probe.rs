//! Provider availability probes.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CACHE_CONTROL;

use crate::types::ProviderId;

/// Answers whether a provider can currently take a turn.
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    async fn is_available(&self, provider_id: &str) -> bool;
}

/// Probe backed by the application's health endpoints.
///
/// A provider is available iff its health endpoint answers `204 No Content`.
/// Transport failures and providers without a known endpoint count as
/// unavailable.
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    base_url: String,
    http: reqwest::Client,
    paths: HashMap<String, String>,
}

impl HttpHealthProbe {
    pub fn new(base_url: impl Into<String>) -> Self {
        let paths = [
            (ProviderId::HEYGEN, "/api/streaming/health"),
            (ProviderId::POLLINATIONS, "/api/pollinations/health"),
            (ProviderId::OPENROUTER, "/api/openrouter/health"),
            (ProviderId::GEMINI, "/api/gemini-stream?health=1"),
            (ProviderId::DEEPSEEK, "/api/deep-seek/health"),
            (ProviderId::CLAUDE, "/api/anthropic/health"),
            (ProviderId::OPENAI, "/api/open-ai/health"),
            (ProviderId::ELEVENLABS, "/api/elevenlabs/health"),
        ]
        .into_iter()
        .map(|(id, path)| (id.to_string(), path.to_string()))
        .collect();

        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            paths,
        }
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Add or replace the health path for a provider.
    pub fn with_path(mut self, provider_id: impl Into<String>, path: impl Into<String>) -> Self {
        self.paths.insert(provider_id.into(), path.into());
        self
    }

    pub fn health_url(&self, provider_id: &str) -> Option<String> {
        self.paths
            .get(provider_id)
            .map(|path| format!("{}{}", self.base_url.trim_end_matches('/'), path))
    }
}

#[async_trait]
impl AvailabilityProbe for HttpHealthProbe {
    async fn is_available(&self, provider_id: &str) -> bool {
        let Some(url) = self.health_url(provider_id) else {
            tracing::debug!(provider = provider_id, "no health endpoint known");
            return false;
        };

        match self
            .http
            .get(&url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
        {
            Ok(resp) => resp.status() == StatusCode::NO_CONTENT,
            Err(err) => {
                tracing::debug!(provider = provider_id, error = %err, "health check failed");
                false
            }
        }
    }
}
