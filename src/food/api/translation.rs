use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::food::config::TranslationConfig;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Translation service returned status {0}")]
    Status(u16),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Translation service returned no text")]
    Empty,
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;

    fn target_language(&self) -> &str;
}

/// Translates `text`, falling back to the untranslated input on any failure.
pub async fn translate_or_original(translator: &dyn Translator, text: &str) -> String {
    match translator.translate(text).await {
        Ok(translated) => translated,
        Err(e) => {
            warn!("Error translating '{}': {}", text, e);
            text.to_string()
        }
    }
}

pub fn from_config(config: &TranslationConfig) -> Box<dyn Translator> {
    if config.enabled {
        Box::new(MyMemoryTranslator::new(config.clone()))
    } else {
        Box::new(PassthroughTranslator::new(&config.target_lang))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: MyMemoryData,
    #[serde(default)]
    response_status: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryData {
    #[serde(default)]
    translated_text: String,
}

#[derive(Debug, Clone)]
pub struct MyMemoryTranslator {
    client: Client,
    base_url: String,
    source_lang: String,
    target_lang: String,
}

impl MyMemoryTranslator {
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            source_lang: config.source_lang,
            target_lang: config.target_lang,
        }
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let url = format!("{}/get", self.base_url);
        let langpair = format!("{}|{}", self.source_lang, self.target_lang);

        let response = self
            .client
            .get(&url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: MyMemoryResponse =
            serde_json::from_slice(&body).map_err(|e| TranslationError::Decode(e.to_string()))?;

        // The service reports quota and input errors in the body with a non-200 status field
        let body_status = match &parsed.response_status {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        };
        if let Some(code) = body_status.filter(|code| *code != 200) {
            return Err(TranslationError::Status(u16::try_from(code).unwrap_or(u16::MAX)));
        }

        let translated = parsed.response_data.translated_text.trim().to_string();
        if translated.is_empty() {
            return Err(TranslationError::Empty);
        }
        Ok(translated)
    }

    fn target_language(&self) -> &str {
        &self.target_lang
    }
}

/// Returns every input unchanged; used when translation is switched off.
#[derive(Debug, Clone)]
pub struct PassthroughTranslator {
    target_lang: String,
}

impl PassthroughTranslator {
    pub fn new(target_lang: &str) -> Self {
        Self {
            target_lang: target_lang.to_string(),
        }
    }
}

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        Ok(text.to_string())
    }

    fn target_language(&self) -> &str {
        &self.target_lang
    }
}
