//! User handlers
//!
//! Registration, profile reads, avatar management, and the subscription
//! actions. Password and token issuance are handled outside this API.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use domain_recipes::ImagePayload;
use infra_db::{NewUser, RecipeRepository, UserRepository, UserRow};
use validator::Validate;

use crate::auth::{AuthUser, MaybeUser};
use crate::dto::recipes::RecipeShortResponse;
use crate::dto::users::*;
use crate::error::ApiError;
use crate::AppState;

/// Builds a user response with the `is_subscribed` flag relative to the
/// viewer (always false for anonymous callers).
async fn user_response(
    state: &AppState,
    viewer: Option<&UserRow>,
    row: UserRow,
) -> Result<UserResponse, ApiError> {
    let is_subscribed = match viewer {
        Some(v) => {
            UserRepository::new(state.pool.clone())
                .is_subscribed(v.id, row.id)
                .await?
        }
        None => false,
    };
    Ok(UserResponse::from_row(row, is_subscribed))
}

/// Registers a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate()?;

    if !request
        .username
        .chars()
        .all(|c| c.is_alphanumeric() || ".@+-_".contains(c))
    {
        return Err(ApiError::Validation(format!(
            "Username {:?} contains invalid characters",
            request.username
        )));
    }

    let row = UserRepository::new(state.pool.clone())
        .insert(NewUser {
            email: request.email,
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_row(row, false))))
}

/// Lists users
pub async fn list_users(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let rows = UserRepository::new(state.pool.clone()).list().await?;

    let mut users = Vec::with_capacity(rows.len());
    for row in rows {
        users.push(user_response(&state, viewer.as_ref(), row).await?);
    }
    Ok(Json(users))
}

/// Gets a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let row = UserRepository::new(state.pool.clone()).find_by_id(id).await?;
    Ok(Json(user_response(&state, viewer.as_ref(), row).await?))
}

/// Gets the calling user's own profile
pub async fn me(
    State(_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserResponse::from_row(user, false)))
}

/// Sets the calling user's avatar from a base64 data URL
pub async fn set_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<SetAvatarRequest>,
) -> Result<Json<AvatarResponse>, ApiError> {
    let payload = ImagePayload::parse(&request.avatar)?;

    UserRepository::new(state.pool.clone())
        .set_avatar(user.id, Some(payload.as_data_url()))
        .await?;

    Ok(Json(AvatarResponse { avatar: payload.into() }))
}

/// Clears the calling user's avatar
pub async fn delete_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, ApiError> {
    UserRepository::new(state.pool.clone())
        .set_avatar(user.id, None)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists the authors the calling user follows, with their recipes
pub async fn subscriptions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<SubscriptionsQuery>,
) -> Result<Json<Vec<SubscriptionResponse>>, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    let recipes = RecipeRepository::new(state.pool.clone());

    // Negative limits behave like no limit
    let limit = query.recipes_limit.filter(|&n| n >= 0);

    let authors = users.subscriptions_of(user.id).await?;

    let mut out = Vec::with_capacity(authors.len());
    for author in authors {
        let author_recipes = recipes.find_by_author(author.id, limit).await?;
        let recipes_count = recipes.count_by_author(author.id).await?;

        out.push(SubscriptionResponse {
            user: UserResponse::from_row(author, true),
            recipes: author_recipes.into_iter().map(RecipeShortResponse::from).collect(),
            recipes_count,
        });
    }

    Ok(Json(out))
}

/// Subscribes the calling user to an author's recipes
pub async fn subscribe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), ApiError> {
    let users = UserRepository::new(state.pool.clone());
    let recipes = RecipeRepository::new(state.pool.clone());

    let author = users.find_by_id(id).await?;

    if author.id == user.id {
        return Err(ApiError::BadRequest("Cannot subscribe to yourself".to_string()));
    }
    if users.is_subscribed(user.id, author.id).await? {
        return Err(ApiError::BadRequest("Already subscribed".to_string()));
    }

    users.add_subscription(user.id, author.id).await?;

    let author_recipes = recipes.find_by_author(author.id, None).await?;
    let recipes_count = recipes.count_by_author(author.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse {
            user: UserResponse::from_row(author, true),
            recipes: author_recipes.into_iter().map(RecipeShortResponse::from).collect(),
            recipes_count,
        }),
    ))
}

/// Cancels a subscription
pub async fn unsubscribe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    let author = users.find_by_id(id).await?;

    if !users.remove_subscription(user.id, author.id).await? {
        return Err(ApiError::BadRequest("Not subscribed".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
