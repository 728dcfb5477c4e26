//! Ingredient catalogue loader
//!
//! Populates the `ingredients` table from a headerless CSV file of
//! `name,measurement_unit` rows. Re-running is safe: pairs already in the
//! catalogue are skipped.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin load-ingredients -- data/ingredients.csv
//! ```

use std::fs::File;
use std::io::Read;

use anyhow::Context;
use serde::Deserialize;

use infra_db::NewIngredient;
use interface_api::config::ApiConfig;

#[derive(Debug, Deserialize)]
struct CsvIngredient {
    name: String,
    measurement_unit: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/ingredients.csv".to_string());

    let file = File::open(&path).with_context(|| format!("Cannot open {path}"))?;
    let items = read_catalogue(file)?;
    tracing::info!(path, rows = items.len(), "Read ingredient catalogue");

    let config = ApiConfig::from_env().unwrap_or_default();
    let pool = infra_db::create_pool(&infra_db::DatabaseConfig::new(&config.database_url)).await?;
    infra_db::MIGRATOR.run(&pool).await?;

    let inserted = infra_db::IngredientRepository::new(pool)
        .import(&items)
        .await?;
    tracing::info!(inserted, skipped = items.len() as u64 - inserted, "Catalogue load complete");

    Ok(())
}

/// Parses `name,measurement_unit` rows, skipping blank names.
fn read_catalogue<R: Read>(reader: R) -> anyhow::Result<Vec<NewIngredient>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut items = Vec::new();
    for record in csv_reader.deserialize() {
        let row: CsvIngredient = record?;
        if row.name.trim().is_empty() {
            continue;
        }
        items.push(NewIngredient {
            name: row.name.trim().to_string(),
            measurement_unit: row.measurement_unit.trim().to_string(),
        });
    }
    Ok(items)
}
