use crate::error::AppError;
use crate::models::{Game, RawGame};
use reqwest::Client;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};

/// A source of full game snapshots.
///
/// Implementations return the complete dataset on every fetch; the store
/// replaces its snapshot wholesale, never incrementally.
pub trait GameSource {
    /// Human-readable origin for log lines.
    fn describe(&self) -> String;

    /// Fetches and decodes the full dataset.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Game>, AppError>> + Send;
}

/// Decodes a JSON document holding an array of game records.
///
/// Each element is decoded individually: a record that fails to decode is
/// logged and skipped rather than failing the whole snapshot. Only a
/// document that is not a JSON array at all is an error.
pub fn decode_games(body: &str) -> Result<Vec<Game>, AppError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(body)?;

    let total = values.len();
    let mut games = Vec::with_capacity(total);
    for (idx, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawGame>(value) {
            Ok(raw) => games.push(raw.resolve()),
            Err(e) => {
                warn!("Skipping malformed game record at index {}: {}", idx, e);
            }
        }
    }

    if games.len() < total {
        warn!(
            "Decoded {} of {} game records; {} skipped",
            games.len(),
            total,
            total - games.len()
        );
    } else {
        debug!("Decoded {} game records", games.len());
    }

    Ok(games)
}

/// Fetches the dataset from a remote URL.
#[derive(Debug, Clone)]
pub struct HttpGameSource {
    client: Client,
    url: String,
}

impl HttpGameSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl GameSource for HttpGameSource {
    fn describe(&self) -> String {
        format!("remote URL {}", self.url)
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<Game>, AppError> {
        info!("Fetching game data from remote URL");
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let message = format!(
                "Schedule fetch failed: {} (URL: {})",
                status.canonical_reason().unwrap_or("Unknown error"),
                self.url
            );
            error!("{}", message);
            return Err(AppError::data_unavailable(message));
        }

        let body = response.text().await?;
        debug!("Response length: {} bytes", body.len());

        let games = decode_games(&body)?;
        info!("Fetched {} games from remote URL", games.len());
        Ok(games)
    }
}

/// Reads the dataset from a local file with the same JSON shape as the
/// remote source.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GameSource for LocalFileSource {
    fn describe(&self) -> String {
        format!("local file {}", self.path.display())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Vec<Game>, AppError> {
        info!("Reading game data from local file");
        let body = tokio::fs::read_to_string(&self.path).await?;
        let games = decode_games(&body)?;
        info!("Read {} games from local file", games.len());
        Ok(games)
    }
}
