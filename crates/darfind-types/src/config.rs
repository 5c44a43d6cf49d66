//! Configuration types for DarFind.
//!
//! `DarfindConfig` represents the `config.toml` in the data directory. Every
//! field has a default, so an empty or missing file yields a runnable setup.
//! Secrets (model API key, chat secret key) are never part of this file.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DarfindConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub prompt: PromptConfig,

    /// SQLite URL. Defaults to `darfind.db` inside the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
}

/// HTTP listener and static asset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `index.html` and a `static/` subdirectory.
    #[serde(default = "default_web_dir")]
    pub web_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_web_dir() -> String {
    "web".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: default_web_dir(),
        }
    }
}

/// Language-model provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// OpenAI-compatible API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_tokens: None,
        }
    }
}

/// Inputs to the lead-intake instruction template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// The only region the assistant discusses.
    #[serde(default = "default_region")]
    pub region: String,

    /// The single referral channel for links and recommendations.
    #[serde(default = "default_listings_url")]
    pub listings_url: String,

    /// Listing sites the assistant must never name or link.
    #[serde(default = "default_competitors")]
    pub competitors: Vec<String>,
}

fn default_assistant_name() -> String {
    "DarFind".to_string()
}

fn default_region() -> String {
    "UAE".to_string()
}

fn default_listings_url() -> String {
    "https://truedar.ae/listings".to_string()
}

fn default_competitors() -> Vec<String> {
    vec![
        "Property Finder".to_string(),
        "Bayut".to_string(),
        "Dubizzle".to_string(),
    ]
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
            region: default_region(),
            listings_url: default_listings_url(),
            competitors: default_competitors(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = DarfindConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.model, "gpt-4");
        assert_eq!(config.prompt.region, "UAE");
        assert_eq!(config.prompt.competitors.len(), 3);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: DarfindConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.web_dir, "web");
        assert!((config.llm.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.prompt.assistant_name, "DarFind");
    }

    #[test]
    fn test_config_deserialize_partial_sections() {
        let toml_str = r#"
database_url = "sqlite://leads.db?mode=rwc"

[server]
port = 9090

[llm]
model = "gpt-4o"
max_tokens = 800

[prompt]
region = "Qatar"
competitors = ["Rival Homes"]
"#;
        let config: DarfindConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.max_tokens, Some(800));
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.prompt.region, "Qatar");
        assert_eq!(config.prompt.competitors, vec!["Rival Homes".to_string()]);
        assert_eq!(config.prompt.listings_url, "https://truedar.ae/listings");
        assert_eq!(
            config.database_url.as_deref(),
            Some("sqlite://leads.db?mode=rwc")
        );
    }
}
