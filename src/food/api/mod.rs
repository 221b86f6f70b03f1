pub mod spoonacular;
pub mod translation;

// Re-export common types
pub use spoonacular::{ApiError, SpoonacularClient};
pub use translation::{translate_or_original, Translator, TranslationError};
