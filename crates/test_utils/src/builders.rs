//! Test data builders
//!
//! Builder patterns for constructing persisted test data with sensible
//! defaults, so tests only spell out the fields they care about.

use domain_recipes::IngredientAmount;
use infra_db::{DatabasePool, NewRecipe, RecipeRepository, RecipeRow};

use crate::fixtures::PNG_DATA_URL;

/// Builder for a persisted test recipe
pub struct TestRecipeBuilder {
    author_id: i64,
    name: String,
    text: String,
    cooking_time: i64,
    ingredients: Vec<IngredientAmount>,
}

impl TestRecipeBuilder {
    /// Creates a builder for a recipe owned by `author_id`
    pub fn new(author_id: i64) -> Self {
        Self {
            author_id,
            name: "Test recipe".to_string(),
            text: "Combine everything and cook.".to_string(),
            cooking_time: 30,
            ingredients: Vec::new(),
        }
    }

    /// Sets the recipe name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the cooking time in minutes
    pub fn with_cooking_time(mut self, minutes: i64) -> Self {
        self.cooking_time = minutes;
        self
    }

    /// Adds an ingredient line
    pub fn with_ingredient(mut self, ingredient_id: i64, amount: f64) -> Self {
        self.ingredients.push(IngredientAmount { ingredient_id, amount });
        self
    }

    /// Persists the recipe and returns its row
    pub async fn build(self, pool: &DatabasePool) -> RecipeRow {
        RecipeRepository::new(pool.clone())
            .insert(
                NewRecipe {
                    author_id: self.author_id,
                    name: self.name,
                    text: self.text,
                    image: PNG_DATA_URL.to_string(),
                    cooking_time: self.cooking_time,
                },
                &self.ingredients,
            )
            .await
            .expect("failed to build test recipe")
    }
}
