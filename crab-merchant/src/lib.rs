//! crab-merchant: tenant-scoped merchant resources
//!
//! CRUD with pagination and logical delete for the merchant back office:
//! kitchen display devices, marketing automations, online order delivery and
//! payment records, QR ordering codes and tip pools. Every resource is served
//! by one generic service ([`crud::CrudService`]) configured per table
//! ([`crud::Resource`]) over a persistence gateway ([`db::Gateway`]).

pub mod api;
pub mod auth;
pub mod config;
pub mod crud;
pub mod db;
pub mod error;
pub mod resources;
pub mod state;
pub mod utils;

pub use config::Config;
pub use state::AppState;
