mod anthropic;
mod factory;
mod fallback;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::{ProviderFactory, ProviderKind, ProviderOverrides};
pub use fallback::FallbackProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_extraction_prompt, TWEAK_EXTRACTION_PROMPT};

use async_trait::async_trait;
use std::error::Error;

/// Error type returned by providers; `Send` so runs can move across tasks
pub type ProviderError = Box<dyn Error + Send + Sync>;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send a system and user prompt, returning the raw text of the reply
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, ProviderError>;
}
