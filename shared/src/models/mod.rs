//! Data models
//!
//! Shared between zofa-server and its tests.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Request payloads default every field so routes can answer missing input
//! with a 400 naming the field instead of a generic deserialization error.

pub mod bread;
pub mod category;
pub mod coupon;
pub mod note;
pub mod order;
pub mod product;
pub mod user;

// Re-exports
pub use bread::*;
pub use category::*;
pub use coupon::*;
pub use note::*;
pub use order::*;
pub use product::*;
pub use user::*;
