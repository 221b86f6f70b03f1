use crate::food::api::spoonacular::NutritionInfo;
use crate::food::models::{NutrientValue, NutritionSummary};

/// Picks carbs, protein and calories out of a detail's nutrient list.
/// Names match case-insensitively; anything missing stays "N/A".
pub fn summarize_nutrition(nutrition: Option<&NutritionInfo>) -> NutritionSummary {
    let Some(info) = nutrition else {
        return NutritionSummary::default();
    };

    // Later entries win on duplicate names
    let lookup = |wanted: &str| {
        info.nutrients
            .iter()
            .rev()
            .find(|n| n.name.to_lowercase() == wanted)
            .map(|n| NutrientValue::Amount(n.amount))
            .unwrap_or(NutrientValue::NotAvailable)
    };

    NutritionSummary {
        carbs: lookup("carbohydrates"),
        proteins: lookup("protein"),
        calories: lookup("calories"),
    }
}
