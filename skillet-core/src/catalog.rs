//! Curated content feed loading.
//!
//! The feed is a JSON array of curated recipe records. Elements decode
//! independently: one malformed record is reported and skipped, never
//! aborting the rest of the batch.

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::curated::CuratedRecipe;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("feed is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("feed must be a JSON array of recipes")]
    NotAnArray,
}

/// A feed element that failed to decode.
#[derive(Debug, Clone)]
pub struct FailedRecord {
    pub index: usize,
    /// The record's id, when the element carried one.
    pub id: Option<String>,
    pub error: String,
}

/// Result of decoding a feed: the good records plus per-item failures.
#[derive(Debug, Default)]
pub struct FeedOutcome {
    pub recipes: Vec<CuratedRecipe>,
    pub failures: Vec<FailedRecord>,
}

/// Decode a whole feed document, skipping malformed elements.
pub fn parse_feed(json: &str) -> Result<FeedOutcome, ContentError> {
    let value: JsonValue = serde_json::from_str(json)?;
    let items = match value {
        JsonValue::Array(items) => items,
        _ => return Err(ContentError::NotAnArray),
    };

    let mut outcome = FeedOutcome::default();
    for (index, item) in items.into_iter().enumerate() {
        let id = item
            .get("id")
            .and_then(JsonValue::as_str)
            .map(str::to_string);
        match serde_json::from_value::<CuratedRecipe>(item) {
            Ok(recipe) => outcome.recipes.push(recipe),
            Err(e) => {
                tracing::warn!(index, id = id.as_deref(), error = %e, "skipping malformed feed record");
                outcome.failures.push(FailedRecord {
                    index,
                    id,
                    error: e.to_string(),
                });
            }
        }
    }
    Ok(outcome)
}

/// Decode a single-recipe document.
pub fn parse_record(json: &str) -> Result<CuratedRecipe, ContentError> {
    Ok(serde_json::from_str(json)?)
}

/// Loaded curated content, sorted by name.
///
/// This is explicit state handed to whoever needs the content; there is no
/// process-wide cache.
#[derive(Debug, Default)]
pub struct Catalog {
    recipes: Vec<CuratedRecipe>,
}

impl Catalog {
    pub fn from_records(mut recipes: Vec<CuratedRecipe>) -> Catalog {
        recipes.sort_by(|a, b| a.name.cmp(&b.name));
        Catalog { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CuratedRecipe> {
        self.recipes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&CuratedRecipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Recipes in the given category, matched case-insensitively.
    pub fn in_category(&self, category: &str) -> Vec<&CuratedRecipe> {
        self.recipes
            .iter()
            .filter(|r| r.category.eq_ignore_ascii_case(category))
            .collect()
    }

    pub fn locked(&self) -> Vec<&CuratedRecipe> {
        self.recipes.iter().filter(|r| r.is_locked).collect()
    }

    pub fn unlocked(&self) -> Vec<&CuratedRecipe> {
        self.recipes.iter().filter(|r| !r.is_locked).collect()
    }
}
