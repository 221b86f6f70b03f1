use colored::Colorize;
use log::warn;
use std::path::Path;

use crate::config::AppConfig;
use crate::database::{CacheMode, MealCache};
use crate::food::api::spoonacular::SpoonacularClient;
use crate::food::api::translation::{self, Translator};
use crate::food::finder::{FindOutcome, MealFinder, MealSource};

pub const DEFAULT_INCLUDED: &[&str] = &["ham", "chicken", "onion"];
pub const DEFAULT_EXCLUDED: &[&str] = &["potato"];

/// Falls back to the bundled example query when neither list was given.
pub fn resolve_query(include: Vec<String>, exclude: Vec<String>) -> (Vec<String>, Vec<String>) {
    if include.is_empty() && exclude.is_empty() {
        (
            DEFAULT_INCLUDED.iter().map(|s| s.to_string()).collect(),
            DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect(),
        )
    } else {
        (include, exclude)
    }
}

pub async fn handle_find(
    config: &AppConfig,
    include: Vec<String>,
    exclude: Vec<String>,
) -> Result<FindOutcome, String> {
    let (include, exclude) = resolve_query(include, exclude);

    // One client and one translator per invocation
    let client = SpoonacularClient::new(config.spoonacular.clone());
    let translator = translation::from_config(&config.translation);
    let cache = MealCache::new(&config.database_path, config.cache_mode);

    if let Err(e) = cache.initialize().await {
        warn!("Could not prepare meal cache: {}", e);
    }

    let finder = MealFinder::new(&client, translator.as_ref(), &cache, &config.output_dir);
    let outcome = finder.find(&include, &exclude).await;
    print_outcome(&outcome);
    if let (FindOutcome::Rendered { .. }, Some(note)) =
        (&outcome, translation_note(translator.as_ref(), config.translation.enabled))
    {
        println!("{}", note);
    }
    Ok(outcome)
}

fn translation_note(translator: &dyn Translator, enabled: bool) -> Option<String> {
    if !enabled {
        return None;
    }
    Some(format!(
        "🌍 Missing ingredients translated to {}",
        translator.target_language().cyan()
    ))
}

pub async fn handle_setup(database_path: &Path) -> Result<(), String> {
    let cache = MealCache::new(database_path, CacheMode::ReadWrite);
    cache
        .initialize()
        .await
        .map_err(|e| format!("Failed to initialize database: {}", e))?;
    println!("✅ Meal cache ready at {}", database_path.display().to_string().cyan());
    Ok(())
}

pub async fn handle_nutrition(config: &AppConfig, id: i64) -> Result<(), String> {
    let client = SpoonacularClient::new(config.spoonacular.clone());
    let widget = client
        .nutrition_widget(id)
        .await
        .map_err(|e| format!("Error fetching nutrition details for ID {}: {}", id, e))?;

    println!("🥗 Nutrition for recipe {}:", id.to_string().cyan());
    println!("  • Calories: {}", widget.calories);
    println!("  • Carbs: {}", widget.carbs);
    println!("  • Fat: {}", widget.fat);
    println!("  • Protein: {}", widget.protein);
    Ok(())
}

fn print_outcome(outcome: &FindOutcome) {
    match outcome {
        FindOutcome::Rejected { conflicts } => {
            println!(
                "{} {}",
                "❌ Ingredients both included and excluded:".red(),
                conflicts.join(", ")
            );
        }
        FindOutcome::Rendered {
            page,
            meals,
            source,
            written,
        } => {
            let origin = match source {
                MealSource::Cache => "cache",
                MealSource::Api => "API",
            };
            println!("🍳 Found {} meals (from {})", meals.len().to_string().cyan(), origin);
            for meal in meals {
                println!("  • {}", meal.title);
            }
            if *written {
                println!("📄 Page written to {}", page.display().to_string().green());
            } else {
                println!("{} {}", "⚠️ Could not write page".yellow(), page.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_query_defaults() {
        let (include, exclude) = resolve_query(Vec::new(), Vec::new());
        assert_eq!(include, vec!["ham", "chicken", "onion"]);
        assert_eq!(exclude, vec!["potato"]);
    }

    #[test]
    fn test_translation_note_names_target_language() {
        colored::control::set_override(false);
        let translator = translation::PassthroughTranslator::new("pl");
        assert_eq!(
            translation_note(&translator, true).as_deref(),
            Some("🌍 Missing ingredients translated to pl")
        );
        assert_eq!(translation_note(&translator, false), None);
    }

    #[test]
    fn test_resolve_query_keeps_user_lists() {
        let (include, exclude) = resolve_query(Vec::new(), vec!["nuts".to_string()]);
        assert!(include.is_empty());
        assert_eq!(exclude, vec!["nuts"]);
    }
}
