//! Persistence boundary.
//!
//! The core hands whole `Recipe` aggregates across this boundary and has no
//! opinion on the storage format. Implementations surface their own failures
//! through the opaque error type; the core never retries.

use std::collections::HashMap;
use std::error::Error;

use thiserror::Error;
use uuid::Uuid;

use crate::recipe::Recipe;

/// Failure reported by a persistence implementation, propagated as-is.
#[derive(Error, Debug)]
#[error("persistence error: {0}")]
pub struct PersistenceError(pub Box<dyn Error + Send + Sync>);

impl PersistenceError {
    pub fn new(error: impl Into<Box<dyn Error + Send + Sync>>) -> PersistenceError {
        PersistenceError(error.into())
    }
}

/// Storage for recipe aggregates.
///
/// A recipe's steps and ingredients live inside the aggregate, so deleting a
/// recipe removes its children with it; there is no separate child store.
pub trait RecipeRepository {
    /// Insert or replace a recipe by id.
    fn save(&mut self, recipe: Recipe) -> Result<(), PersistenceError>;

    fn get(&self, id: Uuid) -> Result<Option<&Recipe>, PersistenceError>;

    /// Remove a recipe and everything it owns. Absent ids are a no-op.
    fn delete(&mut self, id: Uuid) -> Result<Option<Recipe>, PersistenceError>;

    fn list(&self) -> Result<Vec<&Recipe>, PersistenceError>;
}

/// In-memory store; the single ownership home for recipe aggregates.
#[derive(Debug, Default)]
pub struct MemoryStore {
    recipes: HashMap<Uuid, Recipe>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Recipe> {
        self.recipes.get_mut(&id)
    }
}

impl RecipeRepository for MemoryStore {
    fn save(&mut self, recipe: Recipe) -> Result<(), PersistenceError> {
        self.recipes.insert(recipe.id(), recipe);
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<&Recipe>, PersistenceError> {
        Ok(self.recipes.get(&id))
    }

    fn delete(&mut self, id: Uuid) -> Result<Option<Recipe>, PersistenceError> {
        Ok(self.recipes.remove(&id))
    }

    fn list(&self) -> Result<Vec<&Recipe>, PersistenceError> {
        let mut recipes: Vec<&Recipe> = self.recipes.values().collect();
        recipes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(recipes)
    }
}
