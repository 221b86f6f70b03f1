pub mod analysis;
pub mod api;
pub mod config;
pub mod finder;
pub mod models;
pub mod page;
pub mod query;

pub use finder::{FindOutcome, MealFinder, MealSource};
pub use models::{MealRecord, NutrientValue, NutritionSummary};
