use log::{debug, warn};

use crate::food::analysis::nutrition::summarize_nutrition;
use crate::food::api::spoonacular::{MealDetail, MealSummary, SpoonacularClient};
use crate::food::api::translation::{translate_or_original, Translator};
use crate::food::models::MealRecord;

/// Turns a recipe detail into a [`MealRecord`]. Details without an image yield `None`.
pub async fn build_meal_record(
    detail: &MealDetail,
    included: &[String],
    translator: &dyn Translator,
) -> Option<MealRecord> {
    let image = detail.image.clone().filter(|url| !url.is_empty())?;

    let names: Vec<&str> = detail
        .extended_ingredients
        .iter()
        .map(|ing| ing.name.as_str())
        .collect();

    let mut ingredients_present: Vec<String> = included
        .iter()
        .filter(|wanted| names.contains(&wanted.as_str()))
        .cloned()
        .collect();
    ingredients_present.sort();

    let mut missing_ingredients = Vec::new();
    for name in names.iter().filter(|name| !included.iter().any(|inc| inc.as_str() == **name)) {
        let translated = translate_or_original(translator, name).await;
        missing_ingredients.push(format!("{} ({})", translated, name));
    }
    missing_ingredients.sort();

    Some(MealRecord {
        title: detail.title.clone(),
        image: Some(image),
        ingredients_present,
        missing_ingredients,
        nutrition: summarize_nutrition(detail.nutrition.as_ref()),
    })
}

/// Fetches details for every search hit and keeps the ones that enrich cleanly.
pub async fn enrich_meals(
    client: &SpoonacularClient,
    summaries: &[MealSummary],
    included: &[String],
    translator: &dyn Translator,
) -> Vec<MealRecord> {
    let mut meals = Vec::with_capacity(summaries.len());

    for summary in summaries {
        let detail = match client.details(summary.id).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!("Error fetching meal details for ID {}: {}", summary.id, e);
                continue;
            }
        };

        match build_meal_record(&detail, included, translator).await {
            Some(record) => meals.push(record),
            None => debug!("Skipping meal {} ({}): no image", summary.id, detail.title),
        }
    }

    meals
}
