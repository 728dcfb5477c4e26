//! Recipe repository
//!
//! Database access for recipes, their ingredient links, favorites, and the
//! shopping cart. Creating or updating a recipe replaces its ingredient
//! links inside one transaction so a recipe is never visible half-written.

use chrono::{DateTime, Utc};
use domain_recipes::IngredientAmount;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

/// Database row representation of a recipe
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i64,
    pub created_at: DateTime<Utc>,
}

/// An ingredient link joined with its catalogue entry, for serialization
#[derive(Debug, Clone, FromRow)]
pub struct RecipeIngredientRow {
    pub ingredient_id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: f64,
}

/// One per-recipe ingredient row from a user's cart, before aggregation
#[derive(Debug, Clone, FromRow)]
pub struct CartIngredientRow {
    pub name: String,
    pub measurement_unit: String,
    pub amount: f64,
}

/// Data for creating a new recipe
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i64,
}

/// Data for updating an existing recipe
#[derive(Debug, Clone)]
pub struct RecipeUpdate {
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i64,
}

/// Filters for listing recipes
///
/// The favorited/cart filters carry the viewing user and whether to include
/// or exclude the flagged recipes, mirroring the `is_favorited=1|0` query
/// parameters.
#[derive(Debug, Clone, Default)]
pub struct RecipeListFilter {
    pub author: Option<i64>,
    pub favorited: Option<(i64, bool)>,
    pub in_cart: Option<(i64, bool)>,
}

/// Repository for recipes, favorites, and the shopping cart
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    pool: DatabasePool,
}

impl RecipeRepository {
    /// Creates a new RecipeRepository with the given connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Creates a recipe together with its ingredient links.
    pub async fn insert(
        &self,
        recipe: NewRecipe,
        ingredients: &[IngredientAmount],
    ) -> Result<RecipeRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            INSERT INTO recipes (author_id, name, text, image, cooking_time, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, author_id, name, text, image, cooking_time, created_at
            "#,
        )
        .bind(recipe.author_id)
        .bind(&recipe.name)
        .bind(&recipe.text)
        .bind(&recipe.image)
        .bind(recipe.cooking_time)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for item in ingredients {
            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES (?, ?, ?)",
            )
            .bind(row.id)
            .bind(item.ingredient_id)
            .bind(item.amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Updates a recipe and replaces its ingredient links.
    pub async fn update(
        &self,
        recipe_id: i64,
        update: RecipeUpdate,
        ingredients: &[IngredientAmount],
    ) -> Result<RecipeRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            UPDATE recipes
            SET name = ?, text = ?, image = ?, cooking_time = ?
            WHERE id = ?
            RETURNING id, author_id, name, text, image, cooking_time, created_at
            "#,
        )
        .bind(&update.name)
        .bind(&update.text)
        .bind(&update.image)
        .bind(update.cooking_time)
        .bind(recipe_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("recipe {recipe_id}")))?;

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        for item in ingredients {
            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES (?, ?, ?)",
            )
            .bind(recipe_id)
            .bind(item.ingredient_id)
            .bind(item.amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Deletes a recipe; its links cascade.
    pub async fn delete(&self, recipe_id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(recipe_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("recipe {recipe_id}")));
        }
        Ok(())
    }

    /// Retrieves a recipe by id.
    pub async fn find_by_id(&self, recipe_id: i64) -> Result<RecipeRow, DatabaseError> {
        let row = sqlx::query_as::<_, RecipeRow>(
            "SELECT id, author_id, name, text, image, cooking_time, created_at
             FROM recipes WHERE id = ?",
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("recipe {recipe_id}")))?;

        Ok(row)
    }

    /// Lists recipes newest-first, applying the author/favorited/cart filters.
    pub async fn list(&self, filter: &RecipeListFilter) -> Result<Vec<RecipeRow>, DatabaseError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, author_id, name, text, image, cooking_time, created_at \
             FROM recipes WHERE 1 = 1",
        );

        if let Some(author) = filter.author {
            qb.push(" AND author_id = ").push_bind(author);
        }
        if let Some((user_id, include)) = filter.favorited {
            qb.push(if include { " AND id IN " } else { " AND id NOT IN " });
            qb.push("(SELECT recipe_id FROM favorite_recipes WHERE user_id = ")
                .push_bind(user_id)
                .push(")");
        }
        if let Some((user_id, include)) = filter.in_cart {
            qb.push(if include { " AND id IN " } else { " AND id NOT IN " });
            qb.push("(SELECT recipe_id FROM shopping_cart WHERE user_id = ")
                .push_bind(user_id)
                .push(")");
        }

        qb.push(" ORDER BY id DESC");

        let rows = qb.build_query_as::<RecipeRow>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Lists an author's recipes newest-first, optionally truncated.
    pub async fn find_by_author(
        &self,
        author_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<RecipeRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            "SELECT id, author_id, name, text, image, cooking_time, created_at
             FROM recipes WHERE author_id = ? ORDER BY id DESC LIMIT ?",
        )
        .bind(author_id)
        .bind(limit.unwrap_or(-1))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Counts an author's recipes.
    pub async fn count_by_author(&self, author_id: i64) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = ?")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Returns a recipe's ingredient lines joined with the catalogue.
    pub async fn ingredients_of(
        &self,
        recipe_id: i64,
    ) -> Result<Vec<RecipeIngredientRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, RecipeIngredientRow>(
            r#"
            SELECT ri.ingredient_id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = ?
            ORDER BY i.name
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // Favorites

    pub async fn add_favorite(&self, user_id: i64, recipe_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO favorite_recipes (user_id, recipe_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn remove_favorite(&self, user_id: i64, recipe_id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM favorite_recipes WHERE user_id = ? AND recipe_id = ?")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_favorited(&self, user_id: i64, recipe_id: i64) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM favorite_recipes WHERE user_id = ? AND recipe_id = ?",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    // Shopping cart

    pub async fn add_to_cart(&self, user_id: i64, recipe_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO shopping_cart (user_id, recipe_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn remove_from_cart(&self, user_id: i64, recipe_id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM shopping_cart WHERE user_id = ? AND recipe_id = ?")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_in_cart(&self, user_id: i64, recipe_id: i64) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM shopping_cart WHERE user_id = ? AND recipe_id = ?",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    /// Returns every per-recipe ingredient row across a user's cart.
    ///
    /// These are the raw inputs to `domain_recipes::aggregate`; the grouped
    /// sum itself happens in the domain layer.
    pub async fn cart_ingredients(&self, user_id: i64) -> Result<Vec<CartIngredientRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CartIngredientRow>(
            r#"
            SELECT i.name, i.measurement_unit, ri.amount
            FROM shopping_cart sc
            JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE sc.user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
