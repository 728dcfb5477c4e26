//! Repository implementations
//!
//! One repository per resource: users (including subscriptions),
//! ingredients, and recipes (including favorites and the shopping cart).

pub mod ingredients;
pub mod recipes;
pub mod users;
