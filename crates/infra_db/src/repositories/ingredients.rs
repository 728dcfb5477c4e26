//! Ingredient repository
//!
//! Read access for the ingredient catalogue, plus the bulk import used by
//! the `load-ingredients` binary and single inserts used by seeding and
//! tests. The API exposes ingredients read-only with a case-insensitive
//! name-prefix filter.

use sqlx::FromRow;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

/// Database row representation of an ingredient
#[derive(Debug, Clone, FromRow)]
pub struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

/// Data for creating a new ingredient
#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

/// Repository for the ingredient catalogue
#[derive(Debug, Clone)]
pub struct IngredientRepository {
    pool: DatabasePool,
}

impl IngredientRepository {
    /// Creates a new IngredientRepository with the given connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Inserts an ingredient; a duplicate (name, unit) pair surfaces as
    /// `UniqueViolation`.
    pub async fn insert(&self, ingredient: NewIngredient) -> Result<IngredientRow, DatabaseError> {
        let row = sqlx::query_as::<_, IngredientRow>(
            r#"
            INSERT INTO ingredients (name, measurement_unit)
            VALUES (?, ?)
            RETURNING id, name, measurement_unit
            "#,
        )
        .bind(&ingredient.name)
        .bind(&ingredient.measurement_unit)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves an ingredient by id.
    pub async fn find_by_id(&self, id: i64) -> Result<IngredientRow, DatabaseError> {
        let row = sqlx::query_as::<_, IngredientRow>(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("ingredient {id}")))?;

        Ok(row)
    }

    /// Bulk-inserts catalogue entries, skipping (name, unit) pairs that are
    /// already present. Returns the number of rows actually inserted.
    pub async fn import(&self, items: &[NewIngredient]) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for item in items {
            let result = sqlx::query(
                r#"
                INSERT INTO ingredients (name, measurement_unit)
                VALUES (?, ?)
                ON CONFLICT (name, measurement_unit) DO NOTHING
                "#,
            )
            .bind(&item.name)
            .bind(&item.measurement_unit)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        tracing::info!(inserted, total = items.len(), "Imported ingredient catalogue");
        Ok(inserted)
    }

    /// Lists ingredients, optionally filtered by a case-insensitive
    /// name prefix. LIKE metacharacters in the prefix match literally.
    pub async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<IngredientRow>, DatabaseError> {
        let rows = match name_prefix {
            Some(prefix) => {
                sqlx::query_as::<_, IngredientRow>(
                    r"SELECT id, name, measurement_unit FROM ingredients
                     WHERE lower(name) LIKE lower(?) || '%' ESCAPE '\'
                     ORDER BY name",
                )
                .bind(escape_like(prefix))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, IngredientRow>(
                    "SELECT id, name, measurement_unit FROM ingredients ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    /// Returns the subset of `ids` that exist in the catalogue.
    pub async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, DatabaseError> {
        let mut found = Vec::with_capacity(ids.len());
        for &id in ids {
            let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients WHERE id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
            if exists > 0 {
                found.push(id);
            }
        }
        Ok(found)
    }
}

/// Escapes LIKE metacharacters so a bound prefix only ever matches literally.
fn escape_like(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(escape_like("100% rye"), "100\\% rye");
        assert_eq!(escape_like("sea_salt"), "sea\\_salt");
        assert_eq!(escape_like(r"back\slash"), r"back\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
