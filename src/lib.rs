pub mod commands;
pub mod config;
pub mod database;
pub mod food;

// Re-export commonly used items
pub use config::AppConfig;
pub use database::{CacheMode, MealCache};
pub use food::{FindOutcome, MealFinder, MealRecord};
