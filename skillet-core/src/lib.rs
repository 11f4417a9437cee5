//! Recipe data model, nutrition aggregation, and guided-cooking progress.
//!
//! A `Recipe` owns its `Step`s and `Ingredient`s outright; nutrition totals
//! are always derived from the current ingredient list. Curated content
//! arrives as read-only `CuratedRecipe` records and converts into fully
//! independent editable recipes for the cooking wizard.

pub mod catalog;
pub mod curated;
pub mod directions;
pub mod error;
pub mod ingredient;
pub mod nutrition;
pub mod progress;
pub mod recipe;
pub mod store;
pub mod timing;

pub use catalog::{parse_feed, parse_record, Catalog, ContentError, FailedRecord, FeedOutcome};
pub use curated::{ConvertError, CuratedIngredient, CuratedRecipe, CuratedStep};
pub use error::{DomainError, ValidationError};
pub use ingredient::{by_category, by_step, Ingredient, IngredientUpdate, UNCATEGORIZED};
pub use nutrition::{per_serving, recipe_totals, Macros};
pub use progress::{
    mark_ingredient_completed, mark_step_completed, CookingSession, CookingState,
};
pub use recipe::{Difficulty, Recipe, Step};
pub use store::{MemoryStore, PersistenceError, RecipeRepository};
