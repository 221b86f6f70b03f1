use serde::{Deserialize, Serialize};
use std::fmt;

pub const NOT_AVAILABLE: &str = "N/A";

/// A nutrient amount, or the "N/A" sentinel when the API had nothing for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NutrientValue {
    Amount(f64),
    NotAvailable,
}

impl Default for NutrientValue {
    fn default() -> Self {
        NutrientValue::NotAvailable
    }
}

impl fmt::Display for NutrientValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NutrientValue::Amount(amount) => write!(f, "{}", amount),
            NutrientValue::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

// Stored as a bare JSON number or the "N/A" string
impl Serialize for NutrientValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NutrientValue::Amount(amount) => serializer.serialize_f64(*amount),
            NutrientValue::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for NutrientValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(amount) => NutrientValue::Amount(amount),
            Raw::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(NutrientValue::Amount)
                .unwrap_or(NutrientValue::NotAvailable),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    #[serde(default)]
    pub carbs: NutrientValue,
    #[serde(default)]
    pub proteins: NutrientValue,
    #[serde(default)]
    pub calories: NutrientValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients_present: Vec<String>,
    #[serde(default)]
    pub missing_ingredients: Vec<String>,
    #[serde(default)]
    pub nutrition: NutritionSummary,
}
