//! Shared types for the merchant backend
//!
//! Common types used by the server crate and its API clients: error codes,
//! list request parsing, paginated responses and the resource models.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use request::{ListParams, PageRequest, SortOrder};
pub use response::Paginated;
