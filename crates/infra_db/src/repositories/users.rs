//! User repository
//!
//! Database access for user accounts and the self-referential subscription
//! relation. Self-subscription is rejected by a table CHECK as well as at
//! the API layer; duplicates surface as `DatabaseError::UniqueViolation`.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

/// Database row representation of a user
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Repository for user accounts and subscriptions
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: DatabasePool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Inserts a new user.
    ///
    /// A taken email or username surfaces as `UniqueViolation`.
    pub async fn insert(&self, user: NewUser) -> Result<UserRow, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, username, first_name, last_name, avatar, created_at)
            VALUES (?, ?, ?, ?, NULL, ?)
            RETURNING id, email, username, first_name, last_name, avatar, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a user by id.
    pub async fn find_by_id(&self, id: i64) -> Result<UserRow, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, username, first_name, last_name, avatar, created_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("user {id}")))?;

        Ok(row)
    }

    /// Lists all users ordered by id.
    pub async fn list(&self) -> Result<Vec<UserRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, username, first_name, last_name, avatar, created_at
             FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Sets or clears the user's avatar data URL.
    pub async fn set_avatar(&self, id: i64, avatar: Option<&str>) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE users SET avatar = ? WHERE id = ?")
            .bind(avatar)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {id}")));
        }
        Ok(())
    }

    /// Subscribes one user to another's recipes.
    ///
    /// An existing subscription surfaces as `UniqueViolation`.
    pub async fn add_subscription(
        &self,
        subscriber_id: i64,
        author_id: i64,
    ) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO subscriptions (subscriber_id, author_id) VALUES (?, ?)")
            .bind(subscriber_id)
            .bind(author_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Removes a subscription; returns whether one existed.
    pub async fn remove_subscription(
        &self,
        subscriber_id: i64,
        author_id: i64,
    ) -> Result<bool, DatabaseError> {
        let result =
            sqlx::query("DELETE FROM subscriptions WHERE subscriber_id = ? AND author_id = ?")
                .bind(subscriber_id)
                .bind(author_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether `subscriber_id` follows `author_id`.
    pub async fn is_subscribed(
        &self,
        subscriber_id: i64,
        author_id: i64,
    ) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM subscriptions WHERE subscriber_id = ? AND author_id = ?",
        )
        .bind(subscriber_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Lists the authors a user is subscribed to, ordered by id.
    pub async fn subscriptions_of(&self, subscriber_id: i64) -> Result<Vec<UserRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.avatar, u.created_at
            FROM users u
            JOIN subscriptions s ON s.author_id = u.id
            WHERE s.subscriber_id = ?
            ORDER BY u.id
            "#,
        )
        .bind(subscriber_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
