//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! recipe backend test suite.
//!
//! # Modules
//!
//! - `database`: in-memory SQLite pools with the schema applied
//! - `fixtures`: pre-built users, ingredients, and image payloads
//! - `builders`: builder patterns for persisted test recipes

pub mod builders;
pub mod database;
pub mod fixtures;

pub use builders::*;
pub use database::*;
pub use fixtures::*;
