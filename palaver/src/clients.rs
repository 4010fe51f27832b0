//! Process-wide upstream clients.
//!
//! Each client is built on first use from `<VENDOR>_API_KEY` and an optional
//! `<VENDOR>_API_BASE`, then shared by every caller. A missing key is reported
//! at that first use, not at startup, and leaves the slot empty so a later call
//! can succeed once the key is set.

use std::sync::{Arc, OnceLock};

use palaver_core::client::{LazyClient, UpstreamClient, UpstreamConfig};

use crate::error::ChatError;

static DEEPSEEK: OnceLock<LazyClient<UpstreamClient>> = OnceLock::new();
static ANTHROPIC: OnceLock<LazyClient<UpstreamClient>> = OnceLock::new();

fn deepseek_slot() -> &'static LazyClient<UpstreamClient> {
    DEEPSEEK.get_or_init(LazyClient::new)
}

fn anthropic_slot() -> &'static LazyClient<UpstreamClient> {
    ANTHROPIC.get_or_init(LazyClient::new)
}

pub async fn deepseek_client() -> Result<Arc<UpstreamClient>, ChatError> {
    deepseek_slot()
        .get_or_try_init(|| async {
            UpstreamClient::from_config(&UpstreamConfig::deepseek()).await
        })
        .await
}

pub async fn anthropic_client() -> Result<Arc<UpstreamClient>, ChatError> {
    anthropic_slot()
        .get_or_try_init(|| async {
            UpstreamClient::from_config(&UpstreamConfig::anthropic()).await
        })
        .await
}

/// Drop both cached clients so the next call rebuilds from the environment.
pub async fn reset_clients() {
    if deepseek_slot().reset().await.is_some() {
        tracing::debug!("reset deepseek client");
    }
    if anthropic_slot().reset().await.is_some() {
        tracing::debug!("reset anthropic client");
    }
}
