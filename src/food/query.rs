use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("The following ingredients are both included and excluded: {}", .0.join(", "))]
    Conflict(Vec<String>),
}

/// Included and excluded ingredient lists that are known not to overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientQuery {
    included: Vec<String>,
    excluded: Vec<String>,
}

impl IngredientQuery {
    pub fn new<I, E, S, T>(included: I, excluded: E) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let included = clean_list(included);
        let excluded = clean_list(excluded);

        let excluded_set: HashSet<&str> = excluded.iter().map(String::as_str).collect();
        let mut conflicts: Vec<String> = included
            .iter()
            .filter(|name| excluded_set.contains(name.as_str()))
            .cloned()
            .collect();

        if !conflicts.is_empty() {
            conflicts.sort();
            return Err(QueryError::Conflict(conflicts));
        }

        Ok(Self { included, excluded })
    }

    pub fn included(&self) -> &[String] {
        &self.included
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }
}

// Trim, lowercase, drop blanks and repeats; first occurrence keeps its position
fn clean_list<L, S>(names: L) -> Vec<String>
where
    L: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
