use axum::Router;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use palaver_core::types::ProviderId;
use serde_json::json;

/// How a failed check renders its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingBody {
    /// `text/plain` with a fixed sentence.
    Text(String),
    /// `{"error": "Missing <VAR>"}` naming the first variable.
    Json,
}

/// Checks that a vendor secret is configured.
///
/// The check passes when any of `env_vars` holds a non-blank value. The
/// environment is read on every request, so rotating a key needs no restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheck {
    pub provider: ProviderId,
    pub path: String,
    pub env_vars: Vec<String>,
    pub missing: MissingBody,
}

impl HealthCheck {
    pub fn new<I, S>(
        provider: impl Into<ProviderId>,
        path: impl Into<String>,
        env_vars: I,
        missing: MissingBody,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            provider: provider.into(),
            path: path.into(),
            env_vars: env_vars.into_iter().map(Into::into).collect(),
            missing,
        }
    }

    pub fn deepseek() -> Self {
        Self::new(
            ProviderId::DEEPSEEK,
            "/api/deep-seek/health",
            ["DEEPSEEK_API_KEY"],
            MissingBody::Text(
                "DeepSeek API key is not configured. Set DEEPSEEK_API_KEY on the server.".into(),
            ),
        )
    }

    pub fn anthropic() -> Self {
        Self::new(
            ProviderId::CLAUDE,
            "/api/anthropic/health",
            ["ANTHROPIC_API_KEY"],
            MissingBody::Text(
                "Anthropic API key is not configured. Set ANTHROPIC_API_KEY on the server.".into(),
            ),
        )
    }

    pub fn openai() -> Self {
        Self::new(
            ProviderId::OPENAI,
            "/api/open-ai/health",
            ["OPENAI_API_KEY"],
            MissingBody::Text(
                "OpenAI API key is not configured. Set OPENAI_API_KEY on the server.".into(),
            ),
        )
    }

    pub fn elevenlabs() -> Self {
        Self::new(
            ProviderId::ELEVENLABS,
            "/api/elevenlabs/health",
            ["ELEVENLABS_API_KEY", "NEXT_PUBLIC_ELEVENLABS_API_KEY"],
            MissingBody::Json,
        )
    }

    pub fn heygen() -> Self {
        Self::new(
            ProviderId::HEYGEN,
            "/api/streaming/health",
            ["HEYGEN_API_KEY"],
            MissingBody::Json,
        )
    }

    pub fn openrouter() -> Self {
        Self::new(
            ProviderId::OPENROUTER,
            "/api/openrouter/health",
            ["OPENROUTER_API_KEY"],
            MissingBody::Json,
        )
    }

    pub fn is_configured(&self) -> bool {
        self.env_vars.iter().any(|var| {
            std::env::var(var)
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false)
        })
    }

    pub fn respond(&self) -> Response {
        if self.is_configured() {
            return (
                StatusCode::NO_CONTENT,
                [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
            )
                .into_response();
        }

        tracing::warn!(
            provider = %self.provider,
            path = %self.path,
            "health check failed: secret missing"
        );
        let var = self.env_vars.first().map(String::as_str).unwrap_or("API key");
        match &self.missing {
            MissingBody::Text(text) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))],
                text.clone(),
            )
                .into_response(),
            MissingBody::Json => (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({ "error": format!("Missing {var}") })),
            )
                .into_response(),
        }
    }
}

pub fn default_health_checks() -> Vec<HealthCheck> {
    vec![
        HealthCheck::deepseek(),
        HealthCheck::anthropic(),
        HealthCheck::openai(),
        HealthCheck::elevenlabs(),
        HealthCheck::heygen(),
        HealthCheck::openrouter(),
    ]
}

/// One `GET` route per check.
pub fn health_router(checks: Vec<HealthCheck>) -> Router {
    checks.into_iter().fold(Router::new(), |router, check| {
        let path = check.path.clone();
        router.route(
            &path,
            get(move || {
                let check = check.clone();
                async move { check.respond() }
            }),
        )
    })
}
