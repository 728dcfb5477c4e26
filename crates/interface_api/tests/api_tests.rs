//! End-to-end API tests over an in-memory database

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use infra_db::DatabasePool;
use interface_api::{auth, config::ApiConfig, create_router};
use test_utils::{memory_pool, seed_ingredient, seed_user, TestRecipeBuilder, PNG_DATA_URL};

async fn setup() -> (TestServer, DatabasePool, ApiConfig) {
    let pool = memory_pool().await;
    let config = ApiConfig {
        jwt_secret: "test-secret".to_string(),
        ..ApiConfig::default()
    };
    let server = TestServer::new(create_router(pool.clone(), config.clone())).unwrap();
    (server, pool, config)
}

fn bearer(config: &ApiConfig, user_id: i64) -> HeaderValue {
    let token = auth::create_token(user_id, &config.jwt_secret, 3600).unwrap();
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_and_readiness() {
        let (server, _pool, _config) = setup().await;

        assert_eq!(server.get("/health").await.status_code(), StatusCode::OK);
        assert_eq!(server.get("/health/ready").await.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_reports_catalogue_counts() {
        let (server, pool, _config) = setup().await;
        seed_ingredient(&pool, "flour", "g").await;

        let body: Value = server.get("/health/ready").await.json();

        assert_eq!(body["status"], "ready");
        assert_eq!(body["ingredients"], 1);
        assert_eq!(body["recipes"], 0);
    }

    #[tokio::test]
    async fn test_readiness_fails_without_schema() {
        // Pool without migrations applied
        let pool = infra_db::create_pool(&infra_db::DatabaseConfig::new("sqlite::memory:"))
            .await
            .unwrap();
        let server = TestServer::new(create_router(pool, ApiConfig::default())).unwrap();

        assert_eq!(
            server.get("/health/ready").await.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}

mod ingredients {
    use super::*;

    #[tokio::test]
    async fn test_list_with_prefix_filter() {
        let (server, pool, _config) = setup().await;
        seed_ingredient(&pool, "flour", "g").await;
        seed_ingredient(&pool, "sugar", "g").await;

        let body: Value = server.get("/api/ingredients?name=fl").await.json();
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();

        assert_eq!(names, vec!["flour"]);
    }

    #[tokio::test]
    async fn test_prefix_wildcards_match_literally() {
        let (server, pool, _config) = setup().await;
        seed_ingredient(&pool, "corn", "g").await;
        seed_ingredient(&pool, "c%rn syrup", "ml").await;

        let body: Value = server.get("/api/ingredients?name=c%25").await.json();
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();

        assert_eq!(names, vec!["c%rn syrup"]);
    }

    #[tokio::test]
    async fn test_missing_ingredient_is_404() {
        let (server, _pool, _config) = setup().await;
        let response = server.get("/api/ingredients/42").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}

mod recipes {
    use super::*;

    fn recipe_payload(ingredients: Value) -> Value {
        json!({
            "name": "Pancakes",
            "text": "Mix and fry.",
            "image": PNG_DATA_URL,
            "cooking_time": 20,
            "ingredients": ingredients,
        })
    }

    #[tokio::test]
    async fn test_create_requires_auth() {
        let (server, _pool, _config) = setup().await;

        let response = server
            .post("/api/recipes")
            .json(&recipe_payload(json!([])))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_returns_full_body() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let flour = seed_ingredient(&pool, "flour", "g").await;

        let response = server
            .post("/api/recipes")
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .json(&recipe_payload(json!([{"id": flour.id, "amount": 500.0}])))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["name"], "Pancakes");
        assert_eq!(body["author"]["username"], "alice");
        assert_eq!(body["is_favorited"], false);
        assert_eq!(body["ingredients"][0]["name"], "flour");
        assert_eq!(body["ingredients"][0]["amount"], 500.0);
    }

    #[tokio::test]
    async fn test_create_with_empty_ingredients_is_400() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;

        let response = server
            .post("/api/recipes")
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .json(&recipe_payload(json!([])))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_with_duplicated_ingredient_is_400() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let flour = seed_ingredient(&pool, "flour", "g").await;

        let response = server
            .post("/api/recipes")
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .json(&recipe_payload(json!([
                {"id": flour.id, "amount": 1.0},
                {"id": flour.id, "amount": 2.0},
            ])))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_with_unknown_ingredient_is_400() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;

        let response = server
            .post("/api/recipes")
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .json(&recipe_payload(json!([{"id": 4242, "amount": 1.0}])))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_with_invalid_image_is_400() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let flour = seed_ingredient(&pool, "flour", "g").await;

        let mut payload = recipe_payload(json!([{"id": flour.id, "amount": 1.0}]));
        payload["image"] = json!("not-an-image");

        let response = server
            .post("/api/recipes")
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .json(&payload)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_by_non_author_is_403() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;
        let flour = seed_ingredient(&pool, "flour", "g").await;
        let recipe = TestRecipeBuilder::new(alice.id)
            .with_ingredient(flour.id, 100.0)
            .build(&pool)
            .await;

        let response = server
            .patch(&format!("/api/recipes/{}", recipe.id))
            .add_header(header::AUTHORIZATION, bearer(&config, bob.id))
            .json(&recipe_payload(json!([{"id": flour.id, "amount": 1.0}])))
            .await;

        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_delete_by_author_is_204() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let recipe = TestRecipeBuilder::new(alice.id).build(&pool).await;

        let response = server
            .delete(&format!("/api/recipes/{}", recipe.id))
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

        let response = server.get(&format!("/api/recipes/{}", recipe.id)).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_favorited_filter_returns_flagged_recipes() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let liked = TestRecipeBuilder::new(alice.id).with_name("liked").build(&pool).await;
        TestRecipeBuilder::new(alice.id).with_name("other").build(&pool).await;

        server
            .post(&format!("/api/recipes/{}/favorite", liked.id))
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;

        let body: Value = server
            .get("/api/recipes?is_favorited=1")
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await
            .json();

        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["name"], "liked");
        assert_eq!(list[0]["is_favorited"], true);
    }
}

mod favorites_and_cart {
    use super::*;

    #[tokio::test]
    async fn test_double_favorite_is_400() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let recipe = TestRecipeBuilder::new(alice.id).build(&pool).await;
        let url = format!("/api/recipes/{}/favorite", recipe.id);

        let first = server
            .post(&url)
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;
        assert_eq!(first.status_code(), StatusCode::CREATED);

        let second = server
            .post(&url)
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;
        assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cart_add_twice_is_400() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let recipe = TestRecipeBuilder::new(alice.id).build(&pool).await;
        let url = format!("/api/recipes/{}/shopping_cart", recipe.id);

        let first = server
            .post(&url)
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;
        assert_eq!(first.status_code(), StatusCode::CREATED);
        // The short body comes back on success
        let body: Value = first.json();
        assert_eq!(body["id"], recipe.id);

        let second = server
            .post(&url)
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;
        assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_removing_recipe_not_in_cart_is_400() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let recipe = TestRecipeBuilder::new(alice.id).build(&pool).await;

        let response = server
            .delete(&format!("/api/recipes/{}/shopping_cart", recipe.id))
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_download_returns_pdf_attachment() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let flour = seed_ingredient(&pool, "flour", "g").await;

        let pancakes = TestRecipeBuilder::new(alice.id)
            .with_ingredient(flour.id, 500.0)
            .build(&pool)
            .await;
        let crepes = TestRecipeBuilder::new(alice.id)
            .with_ingredient(flour.id, 250.0)
            .build(&pool)
            .await;

        for id in [pancakes.id, crepes.id] {
            server
                .post(&format!("/api/recipes/{id}/shopping_cart"))
                .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
                .await;
        }

        let response = server
            .get("/api/recipes/download_shopping_cart")
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.header(header::CONTENT_TYPE),
            HeaderValue::from_static("application/pdf")
        );
        assert!(response.as_bytes().starts_with(b"%PDF"));
    }
}

mod short_links {
    use super::*;

    #[tokio::test]
    async fn test_get_link_returns_hex_segment() {
        let (server, pool, _config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let recipe = TestRecipeBuilder::new(alice.id).build(&pool).await;

        let body: Value = server
            .get(&format!("/api/recipes/{}/get-link", recipe.id))
            .await
            .json();

        let link = body["short-link"].as_str().unwrap();
        assert!(link.ends_with(&format!("/s/{:x}", recipe.id)));
    }

    #[tokio::test]
    async fn test_get_link_uses_configured_base() {
        let pool = memory_pool().await;
        let config = ApiConfig {
            jwt_secret: "test-secret".to_string(),
            short_link_base: Some("https://food.example".to_string()),
            ..ApiConfig::default()
        };
        let server = TestServer::new(create_router(pool.clone(), config)).unwrap();
        let alice = seed_user(&pool, "alice").await;
        let recipe = TestRecipeBuilder::new(alice.id).build(&pool).await;

        let body: Value = server
            .get(&format!("/api/recipes/{}/get-link", recipe.id))
            .await
            .json();

        assert_eq!(
            body["short-link"],
            format!("https://food.example/s/{:x}", recipe.id)
        );
    }

    #[tokio::test]
    async fn test_short_link_redirects_to_recipe() {
        let (server, pool, _config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let recipe = TestRecipeBuilder::new(alice.id).build(&pool).await;

        let response = server.get(&format!("/s/{:x}", recipe.id)).await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.header(header::LOCATION),
            HeaderValue::from_str(&format!("/api/recipes/{}", recipe.id)).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_codes_are_404() {
        let (server, _pool, _config) = setup().await;

        assert_eq!(server.get("/s/abcdef").await.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(server.get("/s/nothex!").await.status_code(), StatusCode::NOT_FOUND);
    }
}

mod users {
    use super::*;

    #[tokio::test]
    async fn test_registration_and_me() {
        let (server, _pool, config) = setup().await;

        let response = server
            .post("/api/users")
            .json(&json!({
                "email": "carol@example.com",
                "username": "carol",
                "first_name": "Carol",
                "last_name": "Tester",
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let created: Value = response.json();

        let me: Value = server
            .get("/api/users/me")
            .add_header(header::AUTHORIZATION, bearer(&config, created["id"].as_i64().unwrap()))
            .await
            .json();
        assert_eq!(me["username"], "carol");
    }

    #[tokio::test]
    async fn test_registration_with_bad_email_is_400() {
        let (server, _pool, _config) = setup().await;

        let response = server
            .post("/api/users")
            .json(&json!({
                "email": "not-an-email",
                "username": "carol",
                "first_name": "Carol",
                "last_name": "Tester",
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_self_subscription_is_400() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;

        let response = server
            .post(&format!("/api/users/{}/subscribe", alice.id))
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_subscription_is_400() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;
        let url = format!("/api/users/{}/subscribe", bob.id);

        let first = server
            .post(&url)
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;
        assert_eq!(first.status_code(), StatusCode::CREATED);

        let second = server
            .post(&url)
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;
        assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_subscriptions_listing_with_recipes_limit() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;

        for i in 0..3 {
            TestRecipeBuilder::new(bob.id)
                .with_name(format!("bob recipe {i}"))
                .build(&pool)
                .await;
        }

        server
            .post(&format!("/api/users/{}/subscribe", bob.id))
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;

        let body: Value = server
            .get("/api/users/subscriptions?recipes_limit=2")
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await
            .json();

        let subs = body.as_array().unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0]["username"], "bob");
        assert_eq!(subs[0]["is_subscribed"], true);
        assert_eq!(subs[0]["recipes"].as_array().unwrap().len(), 2);
        assert_eq!(subs[0]["recipes_count"], 3);
    }

    #[tokio::test]
    async fn test_avatar_put_validates_payload() {
        let (server, pool, config) = setup().await;
        let alice = seed_user(&pool, "alice").await;

        let bad = server
            .put("/api/users/me/avatar")
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .json(&json!({"avatar": ""}))
            .await;
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);

        let good = server
            .put("/api/users/me/avatar")
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .json(&json!({"avatar": PNG_DATA_URL}))
            .await;
        assert_eq!(good.status_code(), StatusCode::OK);

        let cleared = server
            .delete("/api/users/me/avatar")
            .add_header(header::AUTHORIZATION, bearer(&config, alice.id))
            .await;
        assert_eq!(cleared.status_code(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_invalid_token_is_401() {
        let (server, _pool, _config) = setup().await;

        let response = server
            .get("/api/users/me")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer garbage"))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}
