//! Infrastructure Database Layer
//!
//! This crate provides database access for the recipe backend on SQLite
//! using SQLx, following the repository pattern: each repository wraps the
//! shared pool and exposes the queries one resource needs, hiding SQL from
//! the domain and API layers.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, RecipeRepository};
//!
//! let pool = create_pool(&DatabaseConfig::new("sqlite://recipes.db")).await?;
//! infra_db::MIGRATOR.run(&pool).await?;
//! let repo = RecipeRepository::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, DatabaseConfig, DatabasePool};
pub use repositories::ingredients::{IngredientRepository, IngredientRow, NewIngredient};
pub use repositories::recipes::{
    CartIngredientRow, NewRecipe, RecipeIngredientRow, RecipeListFilter, RecipeRepository,
    RecipeRow, RecipeUpdate,
};
pub use repositories::users::{NewUser, UserRepository, UserRow};

/// Embedded schema migrations, applied at startup and in tests.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
