//! Recipe Domain
//!
//! This crate implements the domain logic of the recipe-sharing backend that
//! is independent of HTTP and storage concerns:
//!
//! - **Shopping-list aggregation**: grouped sum of ingredient amounts across
//!   the recipes in a user's cart
//! - **Short-link codec**: bijective hex encoding of recipe identifiers
//! - **Recipe validation**: ingredient list and cooking-time rules
//! - **Image payloads**: base64 data-URL parsing for avatars and recipe images

pub mod error;
pub mod image;
pub mod recipe;
pub mod shopping_list;
pub mod shortlink;

pub use error::{ImageError, RecipeError, ShortLinkError};
pub use image::ImagePayload;
pub use recipe::{IngredientAmount, RecipeDraft};
pub use shopping_list::{aggregate, CartEntry, ShoppingListLine};
