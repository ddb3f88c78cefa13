use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Engine configuration
///
/// Model identity and token budget are configuration, not logic: the same
/// pipeline runs against whatever model the deployment names here.
#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    /// Model identifier used for all extraction requests
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens the model may generate per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// API key for the LLM capability (can also come from the
    /// ANTHROPIC_API_KEY environment variable, or per-household from the
    /// caller)
    #[serde(default)]
    pub api_key: Option<String>,
    /// User agent sent with every page fetch
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Link-sharing domains whose URLs are resolved to the canonical page
    #[serde(default = "default_share_domains")]
    pub share_domains: Vec<String>,
}

fn default_model() -> String {
    "claude-haiku-4-5-20251001".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; SmartPantry/1.0)".to_string()
}

fn default_share_domains() -> Vec<String> {
    vec!["pinterest.com".to_string(), "pin.it".to_string()]
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout: default_timeout(),
            api_key: None,
            user_agent: default_user_agent(),
            share_domains: default_share_domains(),
        }
    }
}

impl IngestConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with PANTRY__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: PANTRY__API_KEY, PANTRY__MODEL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("PANTRY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
