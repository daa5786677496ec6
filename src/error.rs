use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    ApiParse(#[from] serde_json::Error),

    #[error("Dataset unavailable: {0}")]
    DataUnavailable(String),

    // Query input errors
    #[error("Malformed date input: {input} (expected YYYY-MM-DD)")]
    MalformedDateInput { input: String },

    // Authentication errors. Messages stay at category level so responses
    // never reveal whether a specific key exists.
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Authentication backend unavailable")]
    AuthBackendError,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a malformed date input error, keeping the offending input
    pub fn malformed_date(input: impl Into<String>) -> Self {
        Self::MalformedDateInput {
            input: input.into(),
        }
    }

    /// Create a dataset unavailable error with context
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    /// True for errors that should abort the request before any query runs
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey | Self::InvalidApiKey | Self::AuthBackendError
        )
    }
}
