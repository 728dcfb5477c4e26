//! Recipe DTOs

use domain_recipes::{IngredientAmount, RecipeDraft};
use infra_db::{RecipeIngredientRow, RecipeRow};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::users::UserResponse;

#[derive(Debug, Deserialize)]
pub struct RecipeIngredientRequest {
    pub id: i64,
    pub amount: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveRecipeRequest {
    pub ingredients: Vec<RecipeIngredientRequest>,
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    /// Base64 data URL
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
}

impl SaveRecipeRequest {
    /// Converts the request into a domain draft for validation.
    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            name: self.name.clone(),
            text: self.text.clone(),
            cooking_time: self.cooking_time,
            ingredients: self
                .ingredients
                .iter()
                .map(|i| IngredientAmount { ingredient_id: i.id, amount: i.amount })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecipeListQuery {
    pub author: Option<i64>,
    /// 1 keeps only favorited recipes, 0 excludes them; other values ignored
    pub is_favorited: Option<u8>,
    pub is_in_shopping_cart: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: f64,
}

impl From<RecipeIngredientRow> for RecipeIngredientResponse {
    fn from(row: RecipeIngredientRow) -> Self {
        Self {
            id: row.ingredient_id,
            name: row.name,
            measurement_unit: row.measurement_unit,
            amount: row.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
}

/// Compact recipe form used by favorite/cart responses and the
/// subscriptions listing.
#[derive(Debug, Serialize)]
pub struct RecipeShortResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

impl From<RecipeRow> for RecipeShortResponse {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image: row.image,
            cooking_time: row.cooking_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}
