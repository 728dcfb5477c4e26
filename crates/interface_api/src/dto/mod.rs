//! Request/Response data transfer objects

pub mod ingredients;
pub mod recipes;
pub mod users;
