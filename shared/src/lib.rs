//! Shared types for the Zofa backend
//!
//! Wire models, the live WebSocket protocol, the unified error system and
//! small helpers used by zofa-server and its tests.

pub mod error;
pub mod live;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
