use crate::error::AppError;
use crate::game_store::source::GameSource;
use crate::models::Game;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Snapshot plus the moment it was fetched. Guarded as one unit so no
/// reader ever observes a half-updated pair.
#[derive(Debug)]
struct SnapshotState {
    games: Arc<[Game]>,
    fetched_at: Option<Instant>,
}

/// Owns the cached game snapshot and refreshes it from a primary source
/// with a fallback.
///
/// `get_games` never fails: on a refresh where both sources error it
/// returns an empty snapshot and deliberately leaves `fetched_at` unset,
/// so the next call retries instead of serving a false-fresh empty result
/// for a full TTL window.
#[derive(Debug)]
pub struct GameStore<P, F> {
    primary: P,
    fallback: F,
    ttl: Duration,
    state: RwLock<SnapshotState>,
}

impl<P: GameSource, F: GameSource> GameStore<P, F> {
    pub fn new(primary: P, fallback: F, ttl: Duration) -> Self {
        Self {
            primary,
            fallback,
            ttl,
            state: RwLock::new(SnapshotState {
                games: Arc::from(Vec::new()),
                fetched_at: None,
            }),
        }
    }

    /// Returns the current snapshot, refreshing it first if the freshness
    /// window has lapsed.
    ///
    /// The refresh holds the write lock for the duration of the fetch, so
    /// concurrent callers hitting an expired cache collapse onto a single
    /// in-flight refresh and all observe its result.
    pub async fn get_games(&self) -> Arc<[Game]> {
        {
            let state = self.state.read().await;
            if let Some(fetched_at) = state.fetched_at
                && fetched_at.elapsed() < self.ttl
            {
                debug!(
                    "Serving cached snapshot: {} games, age {:?}",
                    state.games.len(),
                    fetched_at.elapsed()
                );
                return Arc::clone(&state.games);
            }
        }

        let mut state = self.state.write().await;

        // Another caller may have finished a refresh while we waited
        if let Some(fetched_at) = state.fetched_at
            && fetched_at.elapsed() < self.ttl
        {
            debug!("Snapshot refreshed concurrently, serving it");
            return Arc::clone(&state.games);
        }

        match self.primary.fetch().await {
            Ok(games) => {
                info!(
                    "Snapshot refreshed from {}: {} games",
                    self.primary.describe(),
                    games.len()
                );
                state.games = Arc::from(games);
                state.fetched_at = Some(Instant::now());
                Arc::clone(&state.games)
            }
            Err(primary_err) => {
                warn!(
                    "Fetch from {} failed: {}. Trying {}",
                    self.primary.describe(),
                    primary_err,
                    self.fallback.describe()
                );
                match self.fallback.fetch().await {
                    Ok(games) => {
                        info!(
                            "Snapshot refreshed from {}: {} games",
                            self.fallback.describe(),
                            games.len()
                        );
                        state.games = Arc::from(games);
                        state.fetched_at = Some(Instant::now());
                        Arc::clone(&state.games)
                    }
                    Err(fallback_err) => {
                        error!(
                            "Both sources failed (primary: {}, fallback: {}); serving empty snapshot",
                            primary_err, fallback_err
                        );
                        // Keep the stale state untouched so the next call retries
                        Arc::from(Vec::new())
                    }
                }
            }
        }
    }
}
