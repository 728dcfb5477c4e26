//! Shopping-list aggregation
//!
//! Iterates every ingredient row across the recipes in a user's cart and
//! collapses them into one line per (name, unit) pair, summing amounts for
//! ingredients that appear in multiple recipes. Equivalent to a
//! `GROUP BY name, unit SUM(amount)` over the cart.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A single ingredient row from one recipe in the cart, before aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartEntry {
    /// Ingredient name
    pub name: String,
    /// Measurement unit the amount is expressed in
    pub measurement_unit: String,
    /// Amount required by one recipe
    pub amount: f64,
}

impl CartEntry {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// One aggregated line of the printable shopping list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    /// Total amount summed over every cart recipe using this ingredient
    pub total: f64,
}

impl fmt::Display for ShoppingListLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Whole totals print without a trailing ".0"
        if self.total.fract() == 0.0 {
            write!(f, "{}: {} {}", self.name, self.total as i64, self.measurement_unit)
        } else {
            write!(f, "{}: {} {}", self.name, self.total, self.measurement_unit)
        }
    }
}

/// Aggregates cart entries into shopping-list lines.
///
/// Entries are grouped by (name, unit) so the same ingredient measured in
/// different units stays on separate lines. Output is sorted by name, then
/// unit, so the rendered list is stable regardless of cart insertion order.
pub fn aggregate(entries: &[CartEntry]) -> Vec<ShoppingListLine> {
    let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();

    for entry in entries {
        *totals
            .entry((entry.name.clone(), entry.measurement_unit.clone()))
            .or_insert(0.0) += entry.amount;
    }

    tracing::debug!(entries = entries.len(), lines = totals.len(), "Aggregated shopping cart");

    totals
        .into_iter()
        .map(|((name, measurement_unit), total)| ShoppingListLine {
            name,
            measurement_unit,
            total,
        })
        .collect()
}
