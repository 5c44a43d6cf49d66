//! Configuration for the OpenAI-compatible provider.
//!
//! The same chat-completions protocol is served by OpenAI itself and by
//! gateways and proxies that mimic it, so the base URL is configurable.

use secrecy::SecretString;

/// Default OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier (e.g., "gpt-4").
    pub model: String,
}

impl OpenAiCompatConfig {
    /// OpenAI defaults for the given model.
    pub fn openai(api_key: SecretString, model: &str) -> Self {
        Self {
            provider_name: "openai".into(),
            base_url: OPENAI_BASE_URL.into(),
            api_key,
            model: model.into(),
        }
    }

    /// Point the provider at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_openai_defaults() {
        let config = OpenAiCompatConfig::openai(SecretString::from("sk-test".to_string()), "gpt-4");
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.api_key.expose_secret(), "sk-test");
        assert_eq!(config.model, "gpt-4");
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = OpenAiCompatConfig::openai(SecretString::from("k".to_string()), "gpt-4")
            .with_base_url("http://localhost:4000/v1/");
        assert_eq!(config.base_url, "http://localhost:4000/v1");
    }
}
