//! Ingredient DTOs

use infra_db::IngredientRow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct IngredientListQuery {
    /// Case-insensitive name prefix filter
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl From<IngredientRow> for IngredientResponse {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            measurement_unit: row.measurement_unit,
        }
    }
}
