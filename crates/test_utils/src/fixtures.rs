//! Pre-built test fixtures
//!
//! Ready-to-use users, ingredients, and image payloads. Seeding helpers
//! insert through the same repositories production code uses.

use infra_db::{
    DatabasePool, IngredientRepository, IngredientRow, NewIngredient, NewUser, UserRepository,
    UserRow,
};

/// A 1x1 transparent PNG as a base64 data URL, valid for avatars and
/// recipe images.
pub const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Inserts a user derived from `handle` (email, username, names).
pub async fn seed_user(pool: &DatabasePool, handle: &str) -> UserRow {
    UserRepository::new(pool.clone())
        .insert(NewUser {
            email: format!("{handle}@example.com"),
            username: handle.to_string(),
            first_name: capitalize(handle),
            last_name: "Tester".to_string(),
        })
        .await
        .expect("failed to seed user")
}

/// Inserts an ingredient with the given name and unit.
pub async fn seed_ingredient(pool: &DatabasePool, name: &str, unit: &str) -> IngredientRow {
    IngredientRepository::new(pool.clone())
        .insert(NewIngredient {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
        })
        .await
        .expect("failed to seed ingredient")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
