use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::food::config::SpoonacularConfig;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("API request failed with status: {0}")]
    Status(StatusCode),
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSummary {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<MealSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDetail {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub nutrition: Option<NutritionInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
}

/// Body of `/recipes/{id}/nutritionWidget.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionWidget {
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub carbs: String,
    #[serde(default)]
    pub fat: String,
    #[serde(default)]
    pub protein: String,
}

#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: String,
    page_size: u32,
}

impl SpoonacularClient {
    pub fn new(config: SpoonacularConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        }
    }

    pub async fn search(
        &self,
        included: &[String],
        excluded: &[String],
    ) -> Result<Vec<MealSummary>, ApiError> {
        let url = format!("{}/recipes/complexSearch", self.base_url);
        let params = [
            ("includeIngredients", included.join(",")),
            ("excludeIngredients", excluded.join(",")),
            ("number", self.page_size.to_string()),
            ("apiKey", self.api_key.clone()),
        ];

        let response: SearchResponse = self.get_json(&url, &params).await?;
        Ok(response.results)
    }

    pub async fn details(&self, id: i64) -> Result<MealDetail, ApiError> {
        let url = format!("{}/recipes/{}/information", self.base_url, id);
        let params = [
            ("includeNutrition", "true".to_string()),
            ("apiKey", self.api_key.clone()),
        ];

        self.get_json(&url, &params).await
    }

    pub async fn nutrition_widget(&self, id: i64) -> Result<NutritionWidget, ApiError> {
        let url = format!("{}/recipes/{}/nutritionWidget.json", self.base_url, id);
        let params = [("apiKey", self.api_key.clone())];

        self.get_json(&url, &params).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.client.get(url).query(params).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        // Read the body first so transport and decode failures stay distinct
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
