//! Request handlers

pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod shortlink;
pub mod users;
