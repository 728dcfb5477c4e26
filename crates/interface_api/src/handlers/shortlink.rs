//! Short-link resolution
//!
//! `/s/<code>` decodes the hex segment back to a recipe id and redirects
//! to the recipe detail resource. An undecodable segment looks the same as
//! a missing recipe: 404.

use axum::extract::{Path, State};
use axum::response::Redirect;
use domain_recipes::shortlink;
use infra_db::RecipeRepository;

use crate::error::ApiError;
use crate::AppState;

/// Resolves a short-link code to a recipe redirect
pub async fn resolve(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Redirect, ApiError> {
    let id = shortlink::decode(&code)
        .map_err(|_| ApiError::NotFound(format!("short link {code:?}")))?;

    let row = RecipeRepository::new(state.pool.clone()).find_by_id(id).await?;

    Ok(Redirect::to(&format!("/api/recipes/{}", row.id)))
}
