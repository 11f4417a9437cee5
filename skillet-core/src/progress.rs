//! Cooking progress tracking.
//!
//! Progress blends step and ingredient completion into one fraction. Steps
//! are the primary unit of cooking work, so when both populations exist the
//! blend weighs steps at 0.7 and ingredients at 0.3.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recipe::{Recipe, Step};

const STEP_WEIGHT: f64 = 0.7;
const INGREDIENT_WEIGHT: f64 = 0.3;

/// Where a recipe stands in the cooking flow, derived from its progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingState {
    NotStarted,
    InProgress,
    Completed,
}

impl Recipe {
    /// Recompute `cooking_progress` from the current completion flags.
    ///
    /// Called after any step or ingredient completion change. With no steps
    /// and no ingredients the progress is 0; with only one population the
    /// progress is that population's fraction alone.
    pub fn update_progress(&mut self) {
        let step_frac = fraction(self.steps.iter().filter(|s| s.is_completed()).count(), self.steps.len());
        let ing_frac = fraction(
            self.ingredients.iter().filter(|i| i.is_completed()).count(),
            self.ingredients.len(),
        );

        self.cooking_progress = match (self.steps.is_empty(), self.ingredients.is_empty()) {
            (true, true) => 0.0,
            (false, true) => step_frac,
            (true, false) => ing_frac,
            (false, false) => STEP_WEIGHT * step_frac + INGREDIENT_WEIGHT * ing_frac,
        };
    }

    pub fn cooking_state(&self) -> CookingState {
        if self.cooking_progress <= 0.0 {
            CookingState::NotStarted
        } else if self.cooking_progress >= 1.0 {
            CookingState::Completed
        } else {
            CookingState::InProgress
        }
    }

    /// Mark the whole recipe cooked: every step and ingredient completed,
    /// progress exactly 1.0, `last_cooked` stamped. Idempotent.
    pub fn mark_completed(&mut self) {
        for step in &mut self.steps {
            step.mark_completed();
        }
        for ingredient in &mut self.ingredients {
            ingredient.mark_completed();
        }
        self.cooking_progress = 1.0;
        self.last_cooked = Some(Utc::now());
    }

    /// Clear all completion state: progress exactly 0.0, `last_cooked`
    /// cleared. Idempotent.
    pub fn reset_cooking_progress(&mut self) {
        for step in &mut self.steps {
            step.reset_completion();
        }
        for ingredient in &mut self.ingredients {
            ingredient.reset_completion();
        }
        self.cooking_progress = 0.0;
        self.last_cooked = None;
    }

    /// First step in `ordered_steps` order whose completion flag is false.
    /// This is the wizard's resume point.
    pub fn next_incomplete_step(&self) -> Option<&Step> {
        self.ordered_steps().into_iter().find(|s| !s.is_completed())
    }

    /// True when the recipe has steps and every one is completed.
    pub fn all_steps_completed(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|s| s.is_completed())
    }
}

fn fraction(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    }
}

/// Cursor over a recipe's ordered steps for the cooking wizard.
///
/// The cursor is plain navigation state, not part of the aggregate:
/// "Previous" and "Next" clamp at the first and last step, and completing
/// the current step auto-advances unless already at the end.
#[derive(Debug, Clone, Copy)]
pub struct CookingSession {
    current_index: usize,
}

impl CookingSession {
    /// Start at the first incomplete step, or at the first step when
    /// everything is already complete or there are no steps.
    pub fn resume(recipe: &Recipe) -> CookingSession {
        let current_index = recipe
            .ordered_steps()
            .iter()
            .position(|s| !s.is_completed())
            .unwrap_or(0);
        CookingSession { current_index }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_step<'a>(&self, recipe: &'a Recipe) -> Option<&'a Step> {
        recipe.ordered_steps().into_iter().nth(self.current_index)
    }

    /// Step back, clamping at the first step.
    pub fn previous(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    /// Step forward, clamping at the last step.
    pub fn next(&mut self, recipe: &Recipe) {
        let count = recipe.steps().len();
        if self.current_index + 1 < count {
            self.current_index += 1;
        }
    }

    /// Mark the current step complete, recompute progress, and advance to the
    /// next step unless already on the last one.
    pub fn complete_current(&mut self, recipe: &mut Recipe) {
        let Some(id) = self.current_step(recipe).map(Step::id) else {
            return;
        };
        mark_step_completed(recipe, id);

        if self.current_index + 1 < recipe.steps().len() {
            self.current_index += 1;
        }
    }
}

/// Mark one step complete by id and refresh the recipe's progress.
pub fn mark_step_completed(recipe: &mut Recipe, id: Uuid) {
    if let Some(step) = recipe.step_mut(id) {
        step.mark_completed();
        recipe.update_progress();
    }
}

/// Mark one ingredient complete by id and refresh the recipe's progress.
pub fn mark_ingredient_completed(recipe: &mut Recipe, id: Uuid) {
    if let Some(ingredient) = recipe.ingredient_mut(id) {
        ingredient.mark_completed();
        recipe.update_progress();
    }
}
