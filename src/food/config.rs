use std::env;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SPOONACULAR_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_TRANSLATE_URL: &str = "https://api.mymemory.translated.net";
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Resolves a configuration variable by name; `env_lookup` reads the process environment.
pub type EnvLookup = dyn Fn(&str) -> Option<String>;

pub fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok()
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(String),
    #[error("Invalid URL for {name}: {value}")]
    InvalidUrl { name: String, value: String },
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpoonacularConfig {
    pub api_key: String,
    pub base_url: String,
    pub page_size: u32,
}

impl SpoonacularConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_SPOONACULAR_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Reads `SPOONACULAR_API_KEY`, `SPOONACULAR_BASE_URL` and `SPOONACULAR_PAGE_SIZE`.
    /// An explicit key (from the command line) wins over the environment.
    pub fn from_env(api_key_override: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup, api_key_override)
    }

    pub fn from_lookup(lookup: &EnvLookup, api_key_override: Option<String>) -> Result<Self, ConfigError> {
        let api_key = match api_key_override {
            Some(key) => key,
            None => lookup("SPOONACULAR_API_KEY")
                .ok_or_else(|| ConfigError::MissingVar("SPOONACULAR_API_KEY".to_string()))?,
        };

        let base_url = lookup("SPOONACULAR_BASE_URL")
            .unwrap_or_else(|| DEFAULT_SPOONACULAR_URL.to_string());

        let page_size = match lookup("SPOONACULAR_PAGE_SIZE") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "SPOONACULAR_PAGE_SIZE".to_string(),
                value: raw,
            })?,
            None => DEFAULT_PAGE_SIZE,
        };

        let config = Self {
            api_key,
            base_url,
            page_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingVar("SPOONACULAR_API_KEY".to_string()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "SPOONACULAR_PAGE_SIZE".to_string(),
                value: "0".to_string(),
            });
        }
        validate_url("SPOONACULAR_BASE_URL", &self.base_url)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationConfig {
    pub base_url: String,
    pub source_lang: String,
    pub target_lang: String,
    pub enabled: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TRANSLATE_URL.to_string(),
            source_lang: "en".to_string(),
            target_lang: "pl".to_string(),
            enabled: true,
        }
    }
}

impl TranslationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: &EnvLookup) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let enabled = match lookup("TRANSLATE_ENABLED") {
            Some(raw) => parse_bool("TRANSLATE_ENABLED", &raw)?,
            None => defaults.enabled,
        };

        let config = Self {
            base_url: lookup("TRANSLATE_API_URL").unwrap_or(defaults.base_url),
            source_lang: lookup("TRANSLATE_FROM").unwrap_or(defaults.source_lang),
            target_lang: lookup("TRANSLATE_TO").unwrap_or(defaults.target_lang),
            enabled,
        };
        validate_url("TRANSLATE_API_URL", &config.base_url)?;
        Ok(config)
    }
}

pub(crate) fn validate_url(name: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidUrl {
            name: name.to_string(),
            value: value.to_string(),
        })
}

pub(crate) fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}
