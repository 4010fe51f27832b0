//! palaver-providers
//!
//! Built-in chat adapters: echo placeholders for vendors that are not wired
//! yet, and an OpenAI-compatible chat completions adapter.
#![deny(unsafe_code)]

pub use palaver_core::{ChatError, error, traits, types};

#[macro_use]
mod macros;

pub mod builtins;
pub mod providers;

pub use builtins::{builtin_registry, register_builtins};
pub use providers::chat_completions::{ChatCompletionsAdapter, ChatCompletionsConfig};
pub use providers::stub::{StubProvider, StubStyle};
