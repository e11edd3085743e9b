//! Data models
//!
//! Each resource module carries four shapes:
//! - the stored columns (snake_case, mirrors the table),
//! - `*Create` / `*Update` request payloads (camelCase),
//! - `*Filter` list filters (raw query strings, camelCase keys),
//! - `*Response` DTOs (camelCase, related rows nested as summaries).
//!
//! All IDs are `i64` (PostgreSQL BIGSERIAL); timestamps are Unix millis.

pub mod automation_action;
pub mod common;
pub mod delivery_info;
pub mod kitchen_device;
pub mod kitchen_station;
pub mod marketing_automation;
pub mod online_order;
pub mod payment_info;
pub mod qr_code;
pub mod tip_pool;
pub mod tip_pool_member;

// Re-exports
pub use automation_action::*;
pub use common::*;
pub use delivery_info::*;
pub use kitchen_device::*;
pub use kitchen_station::*;
pub use marketing_automation::*;
pub use online_order::*;
pub use payment_info::*;
pub use qr_code::*;
pub use tip_pool::*;
pub use tip_pool_member::*;
