//! Ingredient handlers
//!
//! The catalogue is read-only over HTTP; entries come from the
//! `load-ingredients` binary.

use axum::extract::{Path, Query, State};
use axum::Json;
use infra_db::IngredientRepository;

use crate::dto::ingredients::{IngredientListQuery, IngredientResponse};
use crate::error::ApiError;
use crate::AppState;

/// Lists ingredients, optionally filtered by name prefix
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientListQuery>,
) -> Result<Json<Vec<IngredientResponse>>, ApiError> {
    let rows = IngredientRepository::new(state.pool.clone())
        .list(query.name.as_deref())
        .await?;

    Ok(Json(rows.into_iter().map(IngredientResponse::from).collect()))
}

/// Gets an ingredient by ID
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<IngredientResponse>, ApiError> {
    let row = IngredientRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?;

    Ok(Json(row.into()))
}
