//! Nutrition aggregation.
//!
//! Recipe nutrition is always derived from the current ingredient list and
//! never stored. Each ingredient contributes its per-serving macros scaled by
//! how many of its servings the recipe uses.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, ValidationError};
use crate::ingredient::Ingredient;

/// The eight tracked nutrition quantities.
///
/// Calories are kcal; protein, carbs, fat, fiber, and sugar are grams;
/// sodium and cholesterol are milligrams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
    pub cholesterol: f64,
}

impl Macros {
    pub const ZERO: Macros = Macros {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
        fiber: 0.0,
        sugar: 0.0,
        sodium: 0.0,
        cholesterol: 0.0,
    };

    /// Every field multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Macros {
        Macros {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
            fiber: self.fiber * factor,
            sugar: self.sugar * factor,
            sodium: self.sodium * factor,
            cholesterol: self.cholesterol * factor,
        }
    }

    /// Reject negative values, naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.fields() {
            if value < 0.0 {
                return Err(ValidationError::NegativeMacro { field, value });
            }
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f64); 8] {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
            ("fiber", self.fiber),
            ("sugar", self.sugar),
            ("sodium", self.sodium),
            ("cholesterol", self.cholesterol),
        ]
    }

    /// Display summary over the headline macros, e.g.
    /// "Cal: 420, P: 36g, C: 6g, F: 30g".
    pub fn summary(&self) -> String {
        format!(
            "Cal: {}, P: {}g, C: {}g, F: {}g",
            self.calories as i64, self.protein as i64, self.carbs as i64, self.fat as i64
        )
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
            fiber: self.fiber + rhs.fiber,
            sugar: self.sugar + rhs.sugar,
            sodium: self.sodium + rhs.sodium,
            cholesterol: self.cholesterol + rhs.cholesterol,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Macros) {
        *self = *self + rhs;
    }
}

/// Total nutrition across a recipe's ingredients.
///
/// Each ingredient contributes `macros × servings_used`.
pub fn recipe_totals(ingredients: &[Ingredient]) -> Macros {
    ingredients
        .iter()
        .fold(Macros::ZERO, |acc, ing| acc + ing.scaled_macros())
}

/// Divide totals by the recipe's servings count.
///
/// `servings` is guaranteed >= 1 by the recipe invariant; a zero here is a
/// domain error, never a NaN.
pub fn per_serving(totals: &Macros, servings: u32) -> Result<Macros, DomainError> {
    if servings == 0 {
        return Err(DomainError::InvalidServings);
    }
    Ok(totals.scaled(1.0 / f64::from(servings)))
}
