//! HTTP API Layer
//!
//! This crate provides the REST API for the recipe-sharing backend using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each resource
//! - **Middleware**: Authentication context and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pdf;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{health, ingredients, recipes, shortlink, users};
use crate::middleware::{audit_middleware, auth_context};
use infra_db::DatabasePool;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DatabasePool,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(pool: DatabasePool, config: ApiConfig) -> Router {
    let state = AppState { pool, config };

    // Public routes (no auth context needed)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/s/:code", get(shortlink::resolve));

    // Ingredient routes (read-only)
    let ingredient_routes = Router::new()
        .route("/", get(ingredients::list_ingredients))
        .route("/:id", get(ingredients::get_ingredient));

    // Recipe routes
    let recipe_routes = Router::new()
        .route("/", get(recipes::list_recipes))
        .route("/", post(recipes::create_recipe))
        .route("/download_shopping_cart", get(recipes::download_shopping_cart))
        .route("/:id", get(recipes::get_recipe))
        .route("/:id", patch(recipes::update_recipe))
        .route("/:id", delete(recipes::delete_recipe))
        .route("/:id/favorite", post(recipes::add_favorite))
        .route("/:id/favorite", delete(recipes::remove_favorite))
        .route("/:id/shopping_cart", post(recipes::add_to_cart))
        .route("/:id/shopping_cart", delete(recipes::remove_from_cart))
        .route("/:id/get-link", get(recipes::get_short_link));

    // User routes
    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route("/", post(users::create_user))
        .route("/me", get(users::me))
        .route("/me/avatar", put(users::set_avatar))
        .route("/me/avatar", delete(users::delete_avatar))
        .route("/subscriptions", get(users::subscriptions))
        .route("/:id", get(users::get_user))
        .route("/:id/subscribe", post(users::subscribe))
        .route("/:id/subscribe", delete(users::unsubscribe));

    // API routes run under the auth context; anonymous reads pass through
    let api_routes = Router::new()
        .nest("/ingredients", ingredient_routes)
        .nest("/recipes", recipe_routes)
        .nest("/users", user_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_context));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
