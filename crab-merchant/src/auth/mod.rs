//! Authentication middleware for merchant API callers

pub mod merchant_auth;

pub use merchant_auth::{Caller, MerchantClaims, merchant_auth_middleware};
