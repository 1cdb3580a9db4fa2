use std::path::PathBuf;

use intentrs_core::{ClassifierError, DEFAULT_CONTEXT_TURNS};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Provider names that can be turned into an inference client.
pub const KNOWN_PROVIDERS: [&str; 2] = ["openai", "zhipu"];

/// Settings for building a classifier.
///
/// Built explicitly and handed to whoever needs it; nothing is cached.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "Settings::default_region")]
    pub cloud_region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_profile: Option<String>,
    #[serde(default = "Settings::default_model_id", alias = "model_arn")]
    pub model_id: String,
    #[serde(default = "Settings::default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "Settings::default_provider")]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "Settings::default_context_turns")]
    pub context_turns: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cloud_region: Self::default_region(),
            cloud_profile: None,
            model_id: Self::default_model_id(),
            max_tokens: Self::default_max_tokens(),
            provider: Self::default_provider(),
            api_key: None,
            base_url: None,
            temperature: 0.0,
            context_turns: Self::default_context_turns(),
        }
    }
}

impl Settings {
    fn default_region() -> String {
        "us-east-1".to_string()
    }

    fn default_model_id() -> String {
        "gpt-4o-mini".to_string()
    }

    const fn default_max_tokens() -> usize {
        5000
    }

    fn default_provider() -> String {
        "openai".to_string()
    }

    const fn default_context_turns() -> usize {
        DEFAULT_CONTEXT_TURNS
    }

    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("intentrs"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load settings: defaults, then `~/intentrs/config.json` when present,
    /// then `.env`, then the process environment.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        let base = if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            Self::from_json(&std::fs::read_to_string(&config_path)?)?
        } else {
            debug!("No config file at {}, using defaults", config_path.display());
            Self::default()
        };

        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply environment-style overrides resolved through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(region) = get("CLOUD_REGION") {
            self.cloud_region = region;
        }
        if let Some(profile) = get("CLOUD_PROFILE") {
            self.cloud_profile = Some(profile);
        }
        if let Some(model) = get("MODEL_ID").or_else(|| get("MODEL_ARN")) {
            self.model_id = model;
        }
        if let Some(max_tokens) = get("MAX_TOKENS") {
            self.max_tokens = parse_number("MAX_TOKENS", &max_tokens)?;
        }
        if let Some(provider) = get("PROVIDER") {
            self.provider = provider.to_lowercase();
        }
        if let Some(api_key) = get("API_KEY") {
            self.api_key = Some(api_key);
        }
        if let Some(base_url) = get("BASE_URL") {
            self.base_url = Some(base_url);
        }
        if let Some(temperature) = get("TEMPERATURE") {
            self.temperature = parse_number("TEMPERATURE", &temperature)?;
        }
        if let Some(turns) = get("CONTEXT_TURNS") {
            self.context_turns = parse_number("CONTEXT_TURNS", &turns)?;
        }

        Ok(self)
    }

    /// Check that a classifier can be built from these settings.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.model_id.trim().is_empty() {
            return Err(ClassifierError::configuration("model_id is empty"));
        }
        if self.max_tokens == 0 {
            return Err(ClassifierError::configuration(
                "max_tokens must be greater than zero",
            ));
        }
        if self.context_turns == 0 {
            return Err(ClassifierError::configuration(
                "context_turns must be greater than zero",
            ));
        }
        if !KNOWN_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(ClassifierError::configuration(format!(
                "unknown provider '{}', expected one of: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }
        self.require_api_key()?;
        Ok(())
    }

    /// The API key, or a configuration error when none is set.
    pub fn require_api_key(&self) -> Result<&str, ClassifierError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ClassifierError::configuration(
                    "API key is missing; set API_KEY or api_key in the config file",
                )
            })
    }

    /// API key with everything but the edges hidden.
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            None => "(not set)".to_string(),
            Some(key) if key.chars().count() > 8 => {
                let head: String = key.chars().take(4).collect();
                let tail: String = key
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("{head}...{tail}")
            }
            Some(_) => "***".to_string(),
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let template = Self {
            api_key: Some("your-api-key-here".to_string()),
            ..Self::default()
        };
        std::fs::write(&config_path, serde_json::to_string_pretty(&template)?)?;

        Ok(config_path)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> anyhow::Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{key} must be a number, got '{value}'"))
}
