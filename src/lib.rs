//! NHL Schedule Query Core
//!
//! This library serves schedule and score queries over a cached JSON
//! dataset of NHL game records, behind API-key authentication and
//! per-plan rate limiting. The GraphQL/HTTP transport is intentionally
//! not part of this crate: a host wires [`api::ApiContext`] into whatever
//! server it runs and calls one method per query operation.
//!
//! # Examples
//!
//! ```rust,no_run
//! use nhl_schedule_api::api::DefaultApiContext;
//! use nhl_schedule_api::config::Config;
//! use nhl_schedule_api::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let context = DefaultApiContext::from_config(&config)?;
//!
//!     // Authenticate and rate-limit, then query
//!     let customer = context.authorize(Some("Bearer development-key")).await?;
//!     println!("authorized as {}", customer.name);
//!
//!     for count in context.weekly_game_count(2, Some(2024)).await {
//!         println!("{}: {} games", count.team_name, count.game_count);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod game_store;
pub mod logging;
pub mod models;
pub mod query;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use api::{ApiContext, DefaultApiContext};
pub use auth::{AuthGate, CredentialBackend, RateLimiter};
pub use config::Config;
pub use error::AppError;
pub use game_store::{GameSource, GameStore};
pub use models::{Customer, Game, Team, TeamGameCount};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
