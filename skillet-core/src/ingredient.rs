//! Ingredient records.
//!
//! One ingredient as used within one recipe: a serving definition, per-serving
//! macros, how many of those servings the recipe consumes, and the metadata
//! the authoring and cooking screens hang off it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::nutrition::Macros;
use crate::timing::format_quantity;

/// Category bucket for ingredients with no category set.
pub const UNCATEGORIZED: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    id: Uuid,
    name: String,
    serving_size: f64,
    unit: String,
    macros: Macros,
    servings_used: f64,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub preparation: Option<String>,
    /// Step number this ingredient is added in, if assigned.
    pub added_in_step: Option<u32>,
    is_completed: bool,
    last_modified: DateTime<Utc>,
}

/// Partial update for an ingredient. Only provided fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub serving_size: Option<f64>,
    pub unit: Option<String>,
    pub macros: Option<Macros>,
    pub servings_used: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub preparation: Option<String>,
    pub added_in_step: Option<u32>,
}

impl Ingredient {
    /// Create an ingredient with per-serving macros and `servings_used = 1.0`.
    pub fn new(
        name: impl Into<String>,
        serving_size: f64,
        unit: impl Into<String>,
        macros: Macros,
    ) -> Result<Ingredient, ValidationError> {
        let name = name.into();
        validate(&name, serving_size, 1.0, &macros)?;

        Ok(Ingredient {
            id: Uuid::new_v4(),
            name,
            serving_size,
            unit: unit.into(),
            macros,
            servings_used: 1.0,
            category: None,
            brand: None,
            preparation: None,
            added_in_step: None,
            is_completed: false,
            last_modified: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn serving_size(&self) -> f64 {
        self.serving_size
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Per-serving macros as entered, unscaled.
    pub fn macros(&self) -> Macros {
        self.macros
    }

    /// How many of this ingredient's servings the recipe uses.
    pub fn servings_used(&self) -> f64 {
        self.servings_used
    }

    pub fn set_servings_used(&mut self, servings_used: f64) -> Result<(), ValidationError> {
        if !(servings_used > 0.0) || !servings_used.is_finite() {
            return Err(ValidationError::NonPositiveServingsUsed(servings_used));
        }
        self.servings_used = servings_used;
        self.last_modified = Utc::now();
        Ok(())
    }

    /// This ingredient's contribution to recipe totals:
    /// per-serving macros scaled by `servings_used`.
    pub fn scaled_macros(&self) -> Macros {
        self.macros.scaled(self.servings_used)
    }

    /// Apply only the provided fields, re-validating the merged result before
    /// any mutation. Refreshes `last_modified` on success.
    pub fn apply_update(&mut self, update: IngredientUpdate) -> Result<(), ValidationError> {
        let name = update.name.as_deref().unwrap_or(&self.name);
        let serving_size = update.serving_size.unwrap_or(self.serving_size);
        let servings_used = update.servings_used.unwrap_or(self.servings_used);
        let macros = update.macros.unwrap_or(self.macros);
        validate(name, serving_size, servings_used, &macros)?;

        if let Some(name) = update.name {
            self.name = name;
        }
        self.serving_size = serving_size;
        self.servings_used = servings_used;
        self.macros = macros;
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        if let Some(brand) = update.brand {
            self.brand = Some(brand);
        }
        if let Some(preparation) = update.preparation {
            self.preparation = Some(preparation);
        }
        if let Some(step) = update.added_in_step {
            self.added_in_step = Some(step);
        }
        self.last_modified = Utc::now();
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn mark_completed(&mut self) {
        self.is_completed = true;
        self.last_modified = Utc::now();
    }

    pub fn reset_completion(&mut self) {
        self.is_completed = false;
        self.last_modified = Utc::now();
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Display string for the serving definition, e.g. "1.5 cups".
    pub fn serving_size_description(&self) -> String {
        format!("{} {}", format_quantity(self.serving_size), self.unit)
    }
}

fn validate(
    name: &str,
    serving_size: f64,
    servings_used: f64,
    macros: &Macros,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !(serving_size > 0.0) || !serving_size.is_finite() {
        return Err(ValidationError::NonPositiveServingSize(serving_size));
    }
    if !(servings_used > 0.0) || !servings_used.is_finite() {
        return Err(ValidationError::NonPositiveServingsUsed(servings_used));
    }
    macros.validate()
}

/// Group ingredients by category, bucketing unset categories under "Other".
pub fn by_category(ingredients: &[Ingredient]) -> BTreeMap<String, Vec<&Ingredient>> {
    let mut groups: BTreeMap<String, Vec<&Ingredient>> = BTreeMap::new();
    for ingredient in ingredients {
        let category = ingredient
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        groups.entry(category).or_default().push(ingredient);
    }
    groups
}

/// Ingredients assigned to the given step, or the unassigned bucket for `None`.
pub fn by_step(ingredients: &[Ingredient], step_number: Option<u32>) -> Vec<&Ingredient> {
    ingredients
        .iter()
        .filter(|i| i.added_in_step == step_number)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn macros(calories: f64, protein: f64) -> Macros {
        Macros {
            calories,
            protein,
            ..Macros::ZERO
        }
    }

    #[test]
    fn test_new_rejects_empty_name() {
        let result = Ingredient::new("   ", 50.0, "grams", Macros::ZERO);
        assert_eq!(result.unwrap_err(), ValidationError::EmptyName);
    }

    #[test]
    fn test_new_rejects_non_positive_serving_size() {
        let result = Ingredient::new("flour", 0.0, "grams", Macros::ZERO);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::NonPositiveServingSize(0.0)
        );
    }

    #[test]
    fn test_new_rejects_negative_macro() {
        let result = Ingredient::new("flour", 50.0, "grams", macros(-10.0, 0.0));
        assert_eq!(
            result.unwrap_err(),
            ValidationError::NegativeMacro {
                field: "calories",
                value: -10.0
            }
        );
    }

    #[test]
    fn test_defaults() {
        let ing = Ingredient::new("flour", 50.0, "grams", macros(190.0, 7.0)).unwrap();
        assert_eq!(ing.servings_used(), 1.0);
        assert!(!ing.is_completed());
        assert_eq!(ing.category, None);
        assert_eq!(ing.added_in_step, None);
    }

    #[test]
    fn test_apply_update_merges_provided_fields() {
        let mut ing = Ingredient::new("flour", 50.0, "grams", macros(190.0, 7.0)).unwrap();
        let before = ing.last_modified();

        ing.apply_update(IngredientUpdate {
            serving_size: Some(60.0),
            category: Some("Baking".to_string()),
            ..IngredientUpdate::default()
        })
        .unwrap();

        assert_eq!(ing.name(), "flour");
        assert_eq!(ing.serving_size(), 60.0);
        assert_eq!(ing.category.as_deref(), Some("Baking"));
        assert!(ing.last_modified() >= before);
    }

    #[test]
    fn test_apply_update_rejects_invalid_merge_without_mutating() {
        let mut ing = Ingredient::new("flour", 50.0, "grams", macros(190.0, 7.0)).unwrap();

        let result = ing.apply_update(IngredientUpdate {
            name: Some("  ".to_string()),
            unit: Some("cups".to_string()),
            ..IngredientUpdate::default()
        });

        assert_eq!(result.unwrap_err(), ValidationError::EmptyName);
        assert_eq!(ing.name(), "flour");
        assert_eq!(ing.unit(), "grams");
    }

    #[test]
    fn test_completion_toggles() {
        let mut ing = Ingredient::new("flour", 50.0, "grams", Macros::ZERO).unwrap();
        ing.mark_completed();
        assert!(ing.is_completed());
        ing.reset_completion();
        assert!(!ing.is_completed());
    }

    #[test]
    fn test_scaled_macros() {
        let mut ing = Ingredient::new("flour", 50.0, "grams", macros(190.0, 7.0)).unwrap();
        ing.set_servings_used(2.5).unwrap();
        let scaled = ing.scaled_macros();
        assert_eq!(scaled.calories, 475.0);
        assert_eq!(scaled.protein, 17.5);
    }

    #[test]
    fn test_by_category_buckets_unset_as_other() {
        let mut spinach = Ingredient::new("spinach", 100.0, "grams", Macros::ZERO).unwrap();
        spinach.category = Some("Produce".to_string());
        let mystery = Ingredient::new("mystery", 1.0, "unit", Macros::ZERO).unwrap();
        let ingredients = vec![spinach, mystery];

        let groups = by_category(&ingredients);
        assert_eq!(groups["Produce"].len(), 1);
        assert_eq!(groups[UNCATEGORIZED].len(), 1);
    }

    #[test]
    fn test_by_step_including_unassigned() {
        let mut eggs = Ingredient::new("eggs", 1.0, "large", Macros::ZERO).unwrap();
        eggs.added_in_step = Some(2);
        let salt = Ingredient::new("salt", 1.0, "pinch", Macros::ZERO).unwrap();
        let ingredients = vec![eggs, salt];

        assert_eq!(by_step(&ingredients, Some(2)).len(), 1);
        assert_eq!(by_step(&ingredients, Some(2))[0].name(), "eggs");
        assert_eq!(by_step(&ingredients, None).len(), 1);
        assert_eq!(by_step(&ingredients, None)[0].name(), "salt");
    }

    #[test]
    fn test_serving_size_description() {
        let ing = Ingredient::new("butter", 1.5, "sticks", Macros::ZERO).unwrap();
        assert_eq!(ing.serving_size_description(), "1.5 sticks");
    }
}
