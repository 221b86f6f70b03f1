pub mod database;

pub use database::{CacheError, CacheMode, MealCache, QueryKey};
