//! User DTOs

use infra_db::UserRow;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::recipes::RecipeShortResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SetAvatarRequest {
    /// Base64 data URL, e.g. "data:image/png;base64,..."
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionsQuery {
    /// Truncates each author's recipe list to at most N entries
    pub recipes_limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_subscribed: bool,
    pub avatar: Option<String>,
}

impl UserResponse {
    pub fn from_row(row: UserRow, is_subscribed: bool) -> Self {
        Self {
            id: row.id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            is_subscribed,
            avatar: row.avatar,
        }
    }
}

/// A subscribed author together with their recipes, for the
/// subscriptions listing.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeShortResponse>,
    pub recipes_count: i64,
}
