//! Default adapter set.

use palaver_registry::ProviderRegistry;

use crate::error::ChatError;
use crate::providers::chat_completions::ChatCompletionsAdapter;
use crate::providers::stub::StubProvider;

/// Register the placeholder adapters plus the OpenAI and OpenRouter
/// chat completions adapters.
///
/// API keys are resolved per request, so registration succeeds even when no
/// vendor is configured.
pub fn register_builtins(registry: &mut ProviderRegistry) -> Result<(), ChatError> {
    for stub in StubProvider::all() {
        registry.register(stub)?;
    }
    registry.register(ChatCompletionsAdapter::openai()?)?;
    registry.register(ChatCompletionsAdapter::openrouter()?)?;
    tracing::debug!(count = registry.len(), "registered built-in adapters");
    Ok(())
}

pub fn builtin_registry() -> Result<ProviderRegistry, ChatError> {
    let mut registry = ProviderRegistry::new();
    register_builtins(&mut registry)?;
    Ok(registry)
}
