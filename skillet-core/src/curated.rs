//! Curated recipe records.
//!
//! Vendor-authored recipes arrive as static JSON with camelCase keys and
//! durations in seconds. Records are read-only; cooking one goes through
//! `to_editable_recipe`, which builds a fully independent `Recipe`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;
use crate::ingredient::{Ingredient, UNCATEGORIZED};
use crate::nutrition::Macros;
use crate::recipe::{Difficulty, Recipe, Step};
use crate::timing::duration_secs;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("recipe \"{0}\" is locked")]
    Locked(String),

    #[error("recipe \"{0}\" has invalid servings")]
    InvalidServings(String),

    #[error("ingredient \"{name}\": {source}")]
    InvalidIngredient {
        name: String,
        #[source]
        source: ValidationError,
    },
}

/// One curated recipe as shipped in the content feed. Immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratedRecipe {
    pub id: String,
    pub name: String,
    pub servings: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub background_image_name: Option<String>,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "duration_secs", default)]
    pub prep_time: Option<Duration>,
    #[serde(with = "duration_secs", default)]
    pub cook_time: Option<Duration>,
    #[serde(with = "duration_secs", default)]
    pub rest_time: Option<Duration>,
    #[serde(default)]
    pub ingredients: Vec<CuratedIngredient>,
    #[serde(default)]
    pub steps: Vec<CuratedStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratedIngredient {
    pub id: String,
    pub name: String,
    pub serving_size: f64,
    pub unit: String,
    /// Macro fields are inline in the feed; any missing field is zero.
    #[serde(flatten)]
    pub macros: Macros,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratedStep {
    pub id: String,
    pub step_number: u32,
    pub instruction: String,
    #[serde(with = "duration_secs", default)]
    pub estimated_time: Option<Duration>,
}

fn default_category() -> String {
    UNCATEGORIZED.to_string()
}

impl CuratedRecipe {
    /// Totals across the curated ingredient list, one serving of each.
    pub fn total_nutrition(&self) -> Macros {
        self.ingredients
            .iter()
            .fold(Macros::ZERO, |acc, i| acc + i.macros)
    }

    /// Build a mutable `Recipe` for the cooking wizard.
    ///
    /// Every ingredient and step is freshly constructed; the result shares no
    /// state with this record, so cooking mutations never touch the curated
    /// content. Locked records do not convert.
    pub fn to_editable_recipe(&self) -> Result<Recipe, ConvertError> {
        if self.is_locked {
            return Err(ConvertError::Locked(self.name.clone()));
        }

        let mut recipe = Recipe::new(self.name.as_str());
        recipe.rating = self.rating;
        recipe
            .set_servings(self.servings)
            .map_err(|_| ConvertError::InvalidServings(self.name.clone()))?;
        recipe.background_image = self.background_image_name.clone();
        recipe.prep_time = self.prep_time;
        recipe.cook_time = self.cook_time;
        recipe.rest_time = self.rest_time;
        recipe.description = self.description.clone();
        recipe.category = self.category.clone();
        recipe.difficulty = Difficulty::parse(&self.difficulty).unwrap_or_else(|| {
            tracing::warn!(
                recipe = %self.name,
                difficulty = %self.difficulty,
                "unknown difficulty, defaulting to Medium"
            );
            Difficulty::Medium
        });

        for curated in &self.ingredients {
            let mut ingredient = Ingredient::new(
                curated.name.as_str(),
                curated.serving_size,
                curated.unit.as_str(),
                curated.macros,
            )
            .map_err(|source| ConvertError::InvalidIngredient {
                name: curated.name.clone(),
                source,
            })?;
            ingredient.category = Some(
                curated
                    .category
                    .clone()
                    .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            );
            recipe.add_ingredient(ingredient);
        }

        for curated in &self.steps {
            let mut step = Step::new(curated.step_number, curated.instruction.as_str());
            step.estimated_time = curated.estimated_time;
            recipe.add_step(step);
        }

        Ok(recipe)
    }
}
