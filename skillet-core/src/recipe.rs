//! Recipe aggregate.
//!
//! A recipe owns its steps and ingredients outright; removing the recipe
//! removes its children with it. Nutrition is always derived from the current
//! ingredient list, never stored.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directions::parse_directions;
use crate::error::DomainError;
use crate::ingredient::Ingredient;
use crate::nutrition::{self, Macros};
use crate::timing::{duration_secs, format_estimate, format_minutes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive parse of a feed or user-entered difficulty string.
    pub fn parse(s: &str) -> Option<Difficulty> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// One instruction within a recipe's procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    id: Uuid,
    /// 1-based position; defines display and wizard order.
    pub step_number: u32,
    pub instruction: String,
    #[serde(with = "duration_secs", default)]
    pub estimated_time: Option<Duration>,
    pub(crate) is_completed: bool,
}

impl Step {
    pub fn new(step_number: u32, instruction: impl Into<String>) -> Step {
        Step {
            id: Uuid::new_v4(),
            step_number,
            instruction: instruction.into(),
            estimated_time: None,
            is_completed: false,
        }
    }

    pub fn with_estimate(step_number: u32, instruction: impl Into<String>, time: Duration) -> Step {
        let mut step = Step::new(step_number, instruction);
        step.estimated_time = Some(time);
        step
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn mark_completed(&mut self) {
        self.is_completed = true;
    }

    pub fn reset_completion(&mut self) {
        self.is_completed = false;
    }

    /// "6 min" / "< 1 min", or `None` when no estimate is set.
    pub fn time_estimate_description(&self) -> Option<String> {
        format_estimate(self.estimated_time)
    }
}

/// The aggregate root: metadata plus owned step and ingredient collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    id: Uuid,
    pub name: String,
    created_at: DateTime<Utc>,
    /// Display-only; not used in any computation.
    pub rating: f64,
    servings: u32,
    pub background_image: Option<String>,
    #[serde(with = "duration_secs", default)]
    pub prep_time: Option<Duration>,
    #[serde(with = "duration_secs", default)]
    pub cook_time: Option<Duration>,
    #[serde(with = "duration_secs", default)]
    pub rest_time: Option<Duration>,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub cuisine: Option<String>,
    tags: BTreeSet<String>,
    pub is_favorite: bool,
    pub notes: String,
    pub(crate) last_cooked: Option<DateTime<Utc>>,
    pub(crate) cooking_progress: f64,
    pub(crate) ingredients: Vec<Ingredient>,
    pub(crate) steps: Vec<Step>,
}

impl Recipe {
    /// Create an empty recipe with defaults: one serving, no rating, no steps
    /// or ingredients.
    pub fn new(name: impl Into<String>) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            rating: 0.0,
            servings: 1,
            background_image: None,
            prep_time: None,
            cook_time: None,
            rest_time: None,
            description: String::new(),
            difficulty: Difficulty::Easy,
            category: "Other".to_string(),
            cuisine: None,
            tags: BTreeSet::new(),
            is_favorite: false,
            notes: String::new(),
            last_cooked: None,
            cooking_progress: 0.0,
            ingredients: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Create a recipe and import its steps from a directions blob.
    pub fn with_directions(name: impl Into<String>, directions: &str) -> Recipe {
        let mut recipe = Recipe::new(name);
        recipe.set_steps_from_text(directions);
        recipe
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    /// Servings is the divisor for all per-serving math and must stay >= 1.
    pub fn set_servings(&mut self, servings: u32) -> Result<(), DomainError> {
        if servings == 0 {
            return Err(DomainError::InvalidServings);
        }
        self.servings = servings;
        Ok(())
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn ingredient(&self, id: Uuid) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id() == id)
    }

    pub fn ingredient_mut(&mut self, id: Uuid) -> Option<&mut Ingredient> {
        self.ingredients.iter_mut().find(|i| i.id() == id)
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
    }

    /// Remove an ingredient by id. Removing an absent ingredient is a no-op.
    pub fn remove_ingredient(&mut self, id: Uuid) -> Option<Ingredient> {
        let index = self.ingredients.iter().position(|i| i.id() == id)?;
        Some(self.ingredients.remove(index))
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, id: Uuid) -> Option<&Step> {
        self.steps.iter().find(|s| s.id() == id)
    }

    pub fn step_mut(&mut self, id: Uuid) -> Option<&mut Step> {
        self.steps.iter_mut().find(|s| s.id() == id)
    }

    pub fn add_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Remove a step by id. Remaining steps keep their numbers; gaps are
    /// tolerated. Removing an absent step is a no-op.
    pub fn remove_step(&mut self, id: Uuid) -> Option<Step> {
        let index = self.steps.iter().position(|s| s.id() == id)?;
        Some(self.steps.remove(index))
    }

    /// Steps sorted by `step_number`, ascending. The sort is stable, so
    /// duplicate numbers keep insertion order; duplicates are logged as a
    /// data-integrity warning, not an error.
    pub fn ordered_steps(&self) -> Vec<&Step> {
        let mut ordered: Vec<&Step> = self.steps.iter().collect();
        ordered.sort_by_key(|s| s.step_number);

        if let Some(dup) = ordered.windows(2).find(|w| w[0].step_number == w[1].step_number) {
            tracing::warn!(
                recipe = %self.name,
                step_number = dup[0].step_number,
                "duplicate step numbers; keeping insertion order"
            );
        }
        ordered
    }

    /// Replace all steps with one step per non-blank line of `text`,
    /// numbered 1..N. Any leading "<number>. " prefixes are stripped.
    /// Existing per-step completion state is discarded.
    pub fn set_steps_from_text(&mut self, text: &str) {
        self.steps = parse_directions(text)
            .into_iter()
            .enumerate()
            .map(|(i, instruction)| Step::new(i as u32 + 1, instruction))
            .collect();
    }

    /// Render steps as "1. …\n2. …" for display and plain-text export.
    pub fn directions_text(&self) -> String {
        self.ordered_steps()
            .iter()
            .map(|s| format!("{}. {}", s.step_number, s.instruction))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Add a tag; adding an existing tag is a no-op. Returns whether the tag
    /// was newly added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Total macros across all ingredients, each scaled by its servings used.
    pub fn total_nutrition(&self) -> Macros {
        nutrition::recipe_totals(&self.ingredients)
    }

    /// Totals divided by the servings count.
    pub fn nutrition_per_serving(&self) -> Result<Macros, DomainError> {
        nutrition::per_serving(&self.total_nutrition(), self.servings)
    }

    /// Prep + cook + rest, with unset segments counting as zero.
    pub fn total_time(&self) -> Duration {
        [self.prep_time, self.cook_time, self.rest_time]
            .into_iter()
            .flatten()
            .sum()
    }

    pub fn prep_time_formatted(&self) -> String {
        format_minutes(self.prep_time)
    }

    pub fn cook_time_formatted(&self) -> String {
        format_minutes(self.cook_time)
    }

    pub fn rest_time_formatted(&self) -> String {
        format_minutes(self.rest_time)
    }

    pub fn last_cooked(&self) -> Option<DateTime<Utc>> {
        self.last_cooked
    }

    pub fn cooking_progress(&self) -> f64 {
        self.cooking_progress
    }

    /// Non-fatal data-integrity report: duplicate step numbers and ingredient
    /// step assignments that reference no existing step.
    pub fn integrity_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut numbers: Vec<u32> = self.steps.iter().map(|s| s.step_number).collect();
        numbers.sort_unstable();
        for pair in numbers.windows(2) {
            if pair[0] == pair[1] {
                warnings.push(format!("duplicate step number {}", pair[0]));
            }
        }
        warnings.dedup();

        for ingredient in &self.ingredients {
            if let Some(n) = ingredient.added_in_step {
                if !self.steps.iter().any(|s| s.step_number == n) {
                    warnings.push(format!(
                        "ingredient \"{}\" assigned to missing step {}",
                        ingredient.name(),
                        n
                    ));
                }
            }
        }
        warnings
    }
}
