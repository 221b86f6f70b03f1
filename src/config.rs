use std::path::PathBuf;

use crate::database::CacheMode;
use crate::food::config::{env_lookup, ConfigError, EnvLookup, SpoonacularConfig, TranslationConfig};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub spoonacular: SpoonacularConfig,
    pub translation: TranslationConfig,
    pub database_path: PathBuf,
    pub output_dir: PathBuf,
    pub cache_mode: CacheMode,
}

impl AppConfig {
    pub fn new(spoonacular: SpoonacularConfig) -> Self {
        Self {
            spoonacular,
            translation: TranslationConfig::default(),
            database_path: PathBuf::from("meals.db"),
            output_dir: PathBuf::from("."),
            cache_mode: CacheMode::ReadWrite,
        }
    }

    pub fn from_env(api_key_override: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup, api_key_override)
    }

    pub fn from_lookup(lookup: &EnvLookup, api_key_override: Option<String>) -> Result<Self, ConfigError> {
        let spoonacular = SpoonacularConfig::from_lookup(lookup, api_key_override)?;
        let translation = TranslationConfig::from_lookup(lookup)?;

        // Cache location and output directory
        let database_path = database_path_from(lookup);
        let output_dir = lookup("MEALS_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let cache_mode = match lookup("MEALS_CACHE_MODE") {
            Some(raw) => raw.parse::<CacheMode>().map_err(|_| ConfigError::InvalidValue {
                name: "MEALS_CACHE_MODE".to_string(),
                value: raw,
            })?,
            None => CacheMode::ReadWrite,
        };

        Ok(Self {
            spoonacular,
            translation,
            database_path,
            output_dir,
            cache_mode,
        })
    }
}

pub fn database_path_from_env() -> PathBuf {
    database_path_from(&env_lookup)
}

fn database_path_from(lookup: &EnvLookup) -> PathBuf {
    lookup("MEALS_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("meals.db"))
}
