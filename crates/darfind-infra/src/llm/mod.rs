//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](darfind_core::llm::provider::LlmProvider)
//! implementation for OpenAI-compatible chat completion APIs, and a factory
//! ([`create_provider`]) that builds it from [`LlmConfig`].

pub mod openai_compat;

use secrecy::SecretString;

use darfind_core::llm::box_provider::BoxLlmProvider;
use darfind_types::config::LlmConfig;

use self::openai_compat::config::OpenAiCompatConfig;
use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] from the configured model and base URL.
///
/// The API key has already been resolved from the environment.
pub fn create_provider(config: &LlmConfig, api_key: SecretString) -> BoxLlmProvider {
    let compat = OpenAiCompatConfig::openai(api_key, &config.model).with_base_url(&config.base_url);
    tracing::info!(
        provider = %compat.provider_name,
        model = %compat.model,
        base_url = %compat.base_url,
        "LLM provider configured"
    );
    BoxLlmProvider::new(OpenAiCompatibleProvider::new(compat))
}
