use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::database::{MealCache, QueryKey};
use crate::food::analysis::enrich::enrich_meals;
use crate::food::api::spoonacular::SpoonacularClient;
use crate::food::api::translation::Translator;
use crate::food::models::MealRecord;
use crate::food::page::{normalized_filename, write_page};
use crate::food::query::{IngredientQuery, QueryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealSource {
    Cache,
    Api,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FindOutcome {
    /// Included and excluded lists overlap; nothing was fetched or written.
    Rejected { conflicts: Vec<String> },
    Rendered {
        page: PathBuf,
        meals: Vec<MealRecord>,
        source: MealSource,
        written: bool,
    },
}

pub struct MealFinder<'a> {
    client: &'a SpoonacularClient,
    translator: &'a dyn Translator,
    cache: &'a MealCache,
    output_dir: PathBuf,
}

impl<'a> MealFinder<'a> {
    pub fn new(
        client: &'a SpoonacularClient,
        translator: &'a dyn Translator,
        cache: &'a MealCache,
        output_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            client,
            translator,
            cache,
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub async fn find<I, E, S, T>(&self, included: I, excluded: E) -> FindOutcome
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let query = match IngredientQuery::new(included, excluded) {
            Ok(query) => query,
            Err(QueryError::Conflict(conflicts)) => {
                error!(
                    "Error: The following ingredients are both included and excluded: {}",
                    conflicts.join(", ")
                );
                return FindOutcome::Rejected { conflicts };
            }
        };

        let key = match QueryKey::new(query.included(), query.excluded()) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!("Could not build cache key, skipping cache: {}", e);
                None
            }
        };

        let cached = match &key {
            Some(key) => self.cache.lookup(key).await,
            None => None,
        };

        // An empty cached list is treated like a miss
        let (meals, source) = match cached {
            Some(meals) if !meals.is_empty() => {
                info!("Loaded {} meals from cache", meals.len());
                (meals, MealSource::Cache)
            }
            _ => {
                let meals = self.fetch(&query).await;
                if let Some(key) = &key {
                    self.cache.store(key, &meals).await;
                }
                (meals, MealSource::Api)
            }
        };

        let page = self.output_dir.join(normalized_filename(query.included()));
        let written = match write_page(&meals, &page).await {
            Ok(()) => {
                info!("Wrote {} meals to {}", meals.len(), page.display());
                true
            }
            Err(e) => {
                error!("{}", e);
                false
            }
        };

        FindOutcome::Rendered {
            page,
            meals,
            source,
            written,
        }
    }

    async fn fetch(&self, query: &IngredientQuery) -> Vec<MealRecord> {
        let summaries = match self.client.search(query.included(), query.excluded()).await {
            Ok(summaries) => summaries,
            Err(e) => {
                warn!("Error fetching meals from API: {}", e);
                return Vec::new();
            }
        };

        info!("Search returned {} meals", summaries.len());
        enrich_meals(self.client, &summaries, query.included(), self.translator).await
    }
}
