//! # Palaver
//!
//! One call shape for many chat backends.
//!
//! - [`ChatProvider`](traits::ChatProvider) adapters registered by id in a
//!   [`ProviderRegistry`](registry::ProviderRegistry)
//! - [`ProviderRouter`](registry::ProviderRouter) for availability fallback
//!   and send timeouts
//! - [`smooth_stream`](streaming::smooth_stream) to drop empty text chunks
//!   from a live stream
//! - [`ApiKeyProvider`](auth::ApiKeyProvider) for explicit / resolver / env
//!   secret lookup
//!
//! ```rust,ignore
//! use palaver::prelude::*;
//!
//! let registry = std::sync::Arc::new(palaver::providers::builtin_registry()?);
//! let router = ProviderRouter::new(registry);
//! let reply = router
//!     .send("deepseek", SendRequest::new(&[], "hello"), &RouteOptions::default())
//!     .await?;
//! ```
#![deny(unsafe_code)]

pub use palaver_core::{auth, defaults, streaming, traits, utils};
pub use palaver_spec::{ChatError, ErrorCategory, error, types};

pub mod clients;

/// Adapter registry, routing and availability probes.
pub mod registry {
    pub use palaver_registry::probe::{AvailabilityProbe, HttpHealthProbe};
    pub use palaver_registry::registry::ProviderRegistry;
    pub use palaver_registry::router::{
        DEFAULT_FALLBACK_ORDER, ProviderRouter, RouteEvent, RouteObserver, RouteOptions,
    };
    pub use palaver_registry::selection::ProviderSelection;
}

/// Built-in adapters.
pub mod providers {
    pub use palaver_providers::providers::chat_completions::{
        ChatCompletionsAdapter, ChatCompletionsConfig, OPENAI_MODEL, OPENROUTER_MODEL,
    };
    pub use palaver_providers::providers::stub::{StubProvider, StubStyle};
    pub use palaver_providers::{builtin_registry, register_builtins};
}

pub mod prelude {
    pub use crate::auth::{ApiKeyProvider, KeySource};
    pub use crate::error::ChatError;
    pub use crate::registry::{ProviderRegistry, ProviderRouter, RouteEvent, RouteOptions};
    pub use crate::streaming::{ChunkStream, SmoothStreamExt, SmoothStreamOptions, smooth_stream};
    pub use crate::traits::{ChatProvider, ProviderInfo, SendRequest};
    pub use crate::types::{
        Attachment, Message, MessageSender, ProviderId, SendOptions, StreamChunk, TextChunk,
        ToolPart, ToolPartState,
    };
}
