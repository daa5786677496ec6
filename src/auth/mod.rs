//! API-key authentication and per-plan rate limiting.
//!
//! [`AuthGate`] resolves a presented key to a [`crate::models::Customer`]
//! through a pluggable [`CredentialBackend`], with a static development-key
//! table outside production. [`RateLimiter`] then decides whether the
//! resolved customer may proceed.

pub mod backend;
pub mod gate;
pub mod rate_limit;

pub use backend::{CredentialBackend, HttpKeyService, KeyBackend, UnconfiguredBackend};
pub use gate::{AuthGate, dev_customer, extract_bearer, key_prefix};
pub use rate_limit::{RateLimiter, daily_limit};
