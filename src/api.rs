//! Request pipeline facade: authentication, rate limiting, then queries.
//!
//! The GraphQL/HTTP transport is not part of this crate; whatever hosts it
//! calls [`ApiContext::authorize`] with the request's `Authorization`
//! header value, then one query method per operation. Query methods read
//! a point-in-time snapshot from the store, so results within one request
//! are consistent.

use crate::auth::{AuthGate, CredentialBackend, KeyBackend, RateLimiter};
use crate::auth::{HttpKeyService, UnconfiguredBackend, extract_bearer};
use crate::config::Config;
use crate::error::AppError;
use crate::game_store::{GameSource, GameStore, HttpGameSource, LocalFileSource};
use crate::models::{Customer, Game, Team, TeamGameCount};
use crate::query;
use chrono::{Datelike, Utc};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// The fully wired context used by the binary.
pub type DefaultApiContext = ApiContext<HttpGameSource, LocalFileSource, KeyBackend>;

pub struct ApiContext<P, F, B> {
    store: GameStore<P, F>,
    gate: AuthGate<B>,
    limiter: RateLimiter,
}

impl DefaultApiContext {
    /// Wires the store, gate, and limiter from configuration. One HTTP
    /// client with the configured timeout serves both the dataset fetch
    /// and the credential backend.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()?;

        let store = GameStore::new(
            HttpGameSource::new(client.clone(), &config.schedule_url),
            LocalFileSource::new(&config.fallback_file),
            Duration::from_secs(config.cache_ttl_seconds),
        );

        let backend = match &config.key_service_url {
            Some(url) => KeyBackend::Http(HttpKeyService::new(client, url)),
            None => KeyBackend::Unconfigured(UnconfiguredBackend),
        };
        let gate = AuthGate::new(backend, config.is_production, config.allow_public_access);

        Ok(Self::new(store, gate, RateLimiter::new()))
    }
}

impl<P: GameSource, F: GameSource, B: CredentialBackend> ApiContext<P, F, B> {
    pub fn new(store: GameStore<P, F>, gate: AuthGate<B>, limiter: RateLimiter) -> Self {
        Self {
            store,
            gate,
            limiter,
        }
    }

    /// Runs the auth gate and the rate limiter for one request.
    ///
    /// `authorization` is the raw `Authorization` header value, if any.
    /// Returns the resolved customer on success; any failure aborts the
    /// request before a query runs.
    #[instrument(skip(self, authorization))]
    pub async fn authorize(&self, authorization: Option<&str>) -> Result<Customer, AppError> {
        let api_key = authorization.and_then(extract_bearer);
        let customer = self.gate.resolve(api_key).await?;

        // Keyless public requests share one identity and thus one window
        let identity = api_key.unwrap_or("public");
        if !self.limiter.check(identity, Some(&customer)).await {
            warn!("Request denied by rate limiter for {}", customer.name);
            return Err(AppError::RateLimitExceeded);
        }

        info!("Request authorized: user={}, plan={}", customer.name, customer.plan);
        Ok(customer)
    }

    /// Full snapshot in source order.
    pub async fn games(&self) -> Vec<Game> {
        query::list_all(&self.store.get_games().await)
    }

    /// Games not yet gone final.
    pub async fn upcoming_games(&self) -> Vec<Game> {
        query::list_upcoming(&self.store.get_games().await)
    }

    /// Games on the current UTC calendar day.
    pub async fn todays_games(&self) -> Vec<Game> {
        let today = Utc::now().date_naive();
        query::games_on_day(&self.store.get_games().await, today)
    }

    /// Games on the previous UTC calendar day.
    pub async fn yesterday_games(&self) -> Vec<Game> {
        let Some(yesterday) = Utc::now().date_naive().pred_opt() else {
            return Vec::new();
        };
        query::games_on_day(&self.store.get_games().await, yesterday)
    }

    /// Games within `[start_date, end_date]`, optionally for one team.
    pub async fn games_by_date_range(
        &self,
        start_date: &str,
        end_date: &str,
        team: Option<&str>,
    ) -> Result<Vec<Game>, AppError> {
        query::list_by_date_range(&self.store.get_games().await, start_date, end_date, team)
    }

    /// Canonical team for a name, or `None` when no game involves it.
    pub async fn team(&self, name: &str) -> Option<Team> {
        query::find_team(&self.store.get_games().await, name)
    }

    /// Weekly per-team game counts. `year` defaults to the current UTC year.
    pub async fn weekly_game_count(
        &self,
        week_number: i32,
        year: Option<i32>,
    ) -> Vec<TeamGameCount> {
        let year = year.unwrap_or_else(|| Utc::now().year());
        query::weekly_game_count(&self.store.get_games().await, week_number, year)
    }
}
