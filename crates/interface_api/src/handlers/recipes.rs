//! Recipe handlers
//!
//! Full CRUD plus the favorite, shopping-cart, short-link, and printable
//! shopping-list actions. Reads are open to anonymous callers; writes
//! require a user, and mutation of a recipe requires its author.

use axum::extract::{Host, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use domain_recipes::{aggregate, shortlink, CartEntry, ImagePayload};
use infra_db::{
    NewRecipe, RecipeListFilter, RecipeRepository, RecipeRow, RecipeUpdate, UserRepository, UserRow,
};
use validator::Validate;

use crate::auth::{AuthUser, MaybeUser};
use crate::dto::recipes::*;
use crate::dto::users::UserResponse;
use crate::error::ApiError;
use crate::pdf;
use crate::AppState;

/// Assembles the full recipe body: embedded author, ingredient lines, and
/// the viewer-relative favorite/cart flags.
async fn recipe_response(
    state: &AppState,
    viewer: Option<&UserRow>,
    row: RecipeRow,
) -> Result<RecipeResponse, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    let recipes = RecipeRepository::new(state.pool.clone());

    let author = users.find_by_id(row.author_id).await?;
    let is_subscribed = match viewer {
        Some(v) => users.is_subscribed(v.id, author.id).await?,
        None => false,
    };

    let ingredients = recipes.ingredients_of(row.id).await?;

    let (is_favorited, is_in_shopping_cart) = match viewer {
        Some(v) => (
            recipes.is_favorited(v.id, row.id).await?,
            recipes.is_in_cart(v.id, row.id).await?,
        ),
        None => (false, false),
    };

    Ok(RecipeResponse {
        id: row.id,
        author: UserResponse::from_row(author, is_subscribed),
        ingredients: ingredients.into_iter().map(RecipeIngredientResponse::from).collect(),
        is_favorited,
        is_in_shopping_cart,
        name: row.name,
        image: row.image,
        text: row.text,
        cooking_time: row.cooking_time,
    })
}

/// Validates the draft and resolves its ingredient references, returning
/// the stored image payload on success.
async fn validate_request(
    state: &AppState,
    request: &SaveRecipeRequest,
) -> Result<ImagePayload, ApiError> {
    request.validate()?;
    request.to_draft().validate()?;

    let image = ImagePayload::parse(&request.image)?;

    let ids: Vec<i64> = request.ingredients.iter().map(|i| i.id).collect();
    let known = infra_db::IngredientRepository::new(state.pool.clone())
        .existing_ids(&ids)
        .await?;
    if let Some(missing) = ids.iter().find(|id| !known.contains(id)) {
        return Err(ApiError::BadRequest(format!("Ingredient {missing} does not exist")));
    }

    Ok(image)
}

/// Lists recipes with the author/favorited/cart filters
pub async fn list_recipes(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    // The flag filters only apply for authenticated callers
    let flag = |value: Option<u8>| match (&viewer, value) {
        (Some(v), Some(1)) => Some((v.id, true)),
        (Some(v), Some(0)) => Some((v.id, false)),
        _ => None,
    };

    let filter = RecipeListFilter {
        author: query.author,
        favorited: flag(query.is_favorited),
        in_cart: flag(query.is_in_shopping_cart),
    };

    let rows = RecipeRepository::new(state.pool.clone()).list(&filter).await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(recipe_response(&state, viewer.as_ref(), row).await?);
    }
    Ok(Json(out))
}

/// Gets a recipe by ID
pub async fn get_recipe(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<i64>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let row = RecipeRepository::new(state.pool.clone()).find_by_id(id).await?;
    Ok(Json(recipe_response(&state, viewer.as_ref(), row).await?))
}

/// Creates a recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<SaveRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let image = validate_request(&state, &request).await?;
    let draft = request.to_draft();

    let row = RecipeRepository::new(state.pool.clone())
        .insert(
            NewRecipe {
                author_id: user.id,
                name: draft.name.clone(),
                text: draft.text.clone(),
                image: image.into(),
                cooking_time: draft.cooking_time,
            },
            &draft.ingredients,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(recipe_response(&state, Some(&user), row).await?),
    ))
}

/// Updates a recipe (author only)
pub async fn update_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<SaveRecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipes = RecipeRepository::new(state.pool.clone());

    let existing = recipes.find_by_id(id).await?;
    if existing.author_id != user.id {
        return Err(ApiError::Forbidden("Only the author can edit a recipe".to_string()));
    }

    let image = validate_request(&state, &request).await?;
    let draft = request.to_draft();

    let row = recipes
        .update(
            id,
            RecipeUpdate {
                name: draft.name.clone(),
                text: draft.text.clone(),
                image: image.into(),
                cooking_time: draft.cooking_time,
            },
            &draft.ingredients,
        )
        .await?;

    Ok(Json(recipe_response(&state, Some(&user), row).await?))
}

/// Deletes a recipe (author only)
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let recipes = RecipeRepository::new(state.pool.clone());

    let existing = recipes.find_by_id(id).await?;
    if existing.author_id != user.id {
        return Err(ApiError::Forbidden("Only the author can delete a recipe".to_string()));
    }

    recipes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Adds a recipe to the calling user's favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), ApiError> {
    let recipes = RecipeRepository::new(state.pool.clone());
    let row = recipes.find_by_id(id).await?;

    if recipes.is_favorited(user.id, id).await? {
        return Err(ApiError::BadRequest("Recipe already in favorites".to_string()));
    }
    recipes.add_favorite(user.id, id).await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Removes a recipe from the calling user's favorites
pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let recipes = RecipeRepository::new(state.pool.clone());
    recipes.find_by_id(id).await?;

    if !recipes.remove_favorite(user.id, id).await? {
        return Err(ApiError::BadRequest("Recipe is not in favorites".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Adds a recipe to the calling user's shopping cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), ApiError> {
    let recipes = RecipeRepository::new(state.pool.clone());
    let row = recipes.find_by_id(id).await?;

    if recipes.is_in_cart(user.id, id).await? {
        return Err(ApiError::BadRequest("Recipe already in shopping cart".to_string()));
    }
    recipes.add_to_cart(user.id, id).await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Removes a recipe from the calling user's shopping cart
pub async fn remove_from_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let recipes = RecipeRepository::new(state.pool.clone());
    recipes.find_by_id(id).await?;

    if !recipes.remove_from_cart(user.id, id).await? {
        return Err(ApiError::BadRequest("Recipe is not in shopping cart".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Renders the calling user's aggregated shopping list as a PDF download
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Response, ApiError> {
    let rows = RecipeRepository::new(state.pool.clone())
        .cart_ingredients(user.id)
        .await?;

    let entries: Vec<CartEntry> = rows
        .into_iter()
        .map(|r| CartEntry::new(r.name, r.measurement_unit, r.amount))
        .collect();

    let lines = aggregate(&entries);
    let bytes = pdf::render_shopping_list(&lines)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.pdf\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Returns the compact short link for a recipe
pub async fn get_short_link(
    State(state): State<AppState>,
    Host(host): Host,
    Path(id): Path<i64>,
) -> Result<Json<ShortLinkResponse>, ApiError> {
    let row = RecipeRepository::new(state.pool.clone()).find_by_id(id).await?;

    let origin = state.config.share_link_origin(&host);
    Ok(Json(ShortLinkResponse {
        short_link: format!("{origin}/s/{}", shortlink::encode(row.id)),
    }))
}
