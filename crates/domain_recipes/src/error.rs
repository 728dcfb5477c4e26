//! Recipe domain errors

use thiserror::Error;

/// Errors raised while validating a recipe draft
#[derive(Debug, Error, PartialEq)]
pub enum RecipeError {
    #[error("Ingredient list is empty")]
    EmptyIngredients,

    #[error("Ingredient {0} is listed more than once")]
    DuplicateIngredient(i64),

    #[error("Amount for ingredient {ingredient_id} must be at least 1, got {amount}")]
    AmountTooSmall { ingredient_id: i64, amount: f64 },

    #[error("Cooking time must be at least 1 minute, got {0}")]
    CookingTimeTooShort(i64),

    #[error("Recipe name must not be empty")]
    EmptyName,
}

/// Errors raised while decoding a short-link segment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortLinkError {
    #[error("Short link is empty")]
    Empty,

    #[error("Short link contains a non-hex character: {0:?}")]
    InvalidDigit(char),

    #[error("Short link does not fit a recipe identifier")]
    Overflow,
}

/// Errors raised while parsing a base64 image payload
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Image payload is empty")]
    Empty,

    #[error("Image payload is not a base64 data URL")]
    NotADataUrl,

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Image payload is not valid base64")]
    InvalidBase64,
}
