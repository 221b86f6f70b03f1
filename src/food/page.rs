use html_escape::{encode_double_quoted_attribute, encode_text};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::food::models::MealRecord;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Error writing to HTML file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn normalize_ingredient_name(name: &str) -> String {
    name.to_lowercase().replace([' ', '-'], "")
}

/// `["Feta", "Eggplant"]` becomes `eggplant_feta.html`, whatever the input order.
pub fn normalized_filename<S: AsRef<str>>(ingredients: &[S]) -> String {
    let mut names: Vec<String> = ingredients
        .iter()
        .map(|name| normalize_ingredient_name(name.as_ref()))
        .collect();
    names.sort();
    format!("{}.html", names.join("_"))
}

pub fn render_page(meals: &[MealRecord]) -> String {
    let mut html = String::from(
        "<html><head><title>Meal Suggestions</title><meta charset=\"UTF-8\"></head><body>",
    );

    for meal in meals {
        let title = encode_text(&meal.title);
        html.push_str(&format!("<h2>{}</h2>", title));
        if let Some(image) = &meal.image {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\"><br>",
                encode_double_quoted_attribute(image),
                encode_double_quoted_attribute(&meal.title)
            ));
        }
        html.push_str(&format!(
            "<strong>Ingredients already present:</strong> {}<br>",
            encode_text(&meal.ingredients_present.join(", "))
        ));
        html.push_str(&format!(
            "<strong>Missing ingredients:</strong> {}<br>",
            encode_text(&meal.missing_ingredients.join(", "))
        ));
        html.push_str(&format!("<strong>Carbs:</strong> {}<br>", meal.nutrition.carbs));
        html.push_str(&format!("<strong>Proteins:</strong> {}<br>", meal.nutrition.proteins));
        html.push_str(&format!("<strong>Calories:</strong> {}<br>", meal.nutrition.calories));
        html.push_str("<hr>");
    }

    html.push_str("</body></html>");
    html
}

/// Renders `meals` and writes the page in one go, replacing any previous file.
pub async fn write_page(meals: &[MealRecord], path: &Path) -> Result<(), PageError> {
    fs::write(path, render_page(meals))
        .await
        .map_err(|source| PageError::Write {
            path: path.to_path_buf(),
            source,
        })
}
