//! Recipe draft validation
//!
//! A draft is what a create or update request carries before it is persisted.
//! Validation mirrors the store's constraints so clients get a 400 instead of
//! a constraint violation: a non-empty, duplicate-free ingredient list,
//! amounts of at least 1, and a cooking time of at least 1 minute.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// An ingredient reference with the amount a recipe uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IngredientAmount {
    pub ingredient_id: i64,
    pub amount: f64,
}

/// Recipe fields as submitted by a client, prior to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
    pub ingredients: Vec<IngredientAmount>,
}

impl RecipeDraft {
    /// Validates the draft against the domain rules.
    ///
    /// Returns the first violation found; the API layer maps every variant
    /// to a client error.
    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.name.trim().is_empty() {
            return Err(RecipeError::EmptyName);
        }
        if self.cooking_time < 1 {
            return Err(RecipeError::CookingTimeTooShort(self.cooking_time));
        }
        if self.ingredients.is_empty() {
            return Err(RecipeError::EmptyIngredients);
        }

        let mut seen = HashSet::new();
        for item in &self.ingredients {
            if !seen.insert(item.ingredient_id) {
                return Err(RecipeError::DuplicateIngredient(item.ingredient_id));
            }
            if item.amount < 1.0 {
                return Err(RecipeError::AmountTooSmall {
                    ingredient_id: item.ingredient_id,
                    amount: item.amount,
                });
            }
        }

        Ok(())
    }
}
