//! Application-wide constants.

/// Default URL of the hosted schedule dataset (JSON array of game records).
pub const DEFAULT_SCHEDULE_URL: &str =
    "https://raw.githubusercontent.com/cabusto/nhl-graphql/refs/heads/main/raw.json";

/// Default on-disk fallback copy of the schedule dataset, relative to the
/// working directory. Used when the remote fetch fails.
pub const DEFAULT_FALLBACK_FILE: &str = "raw.json";

/// Default HTTP timeout in seconds, applied to both the dataset fetch and
/// the credential backend call.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Cache TTL values in seconds
pub mod cache_ttl {
    /// How long a fetched game snapshot stays fresh (1 hour)
    pub const SNAPSHOT_SECONDS: u64 = 3600;
}

/// Static development API keys, honored only outside production.
pub mod dev_keys {
    /// Full-access key for local development
    pub const DEVELOPMENT_KEY: &str = "development-key";
    /// Basic-plan key for exercising quota paths locally
    pub const TEST_KEY: &str = "test-key";
}

/// Daily request quotas per plan
pub mod plan_limits {
    pub const FREE_PER_DAY: u32 = 100;
    pub const BASIC_PER_DAY: u32 = 1000;
    pub const PRO_PER_DAY: u32 = 10000;
}

/// Environment variable names recognized by `Config::load`
pub mod env_vars {
    pub const SCHEDULE_URL: &str = "NHL_API_SCHEDULE_URL";
    pub const FALLBACK_FILE: &str = "NHL_API_FALLBACK_FILE";
    pub const KEY_SERVICE_URL: &str = "NHL_API_KEY_SERVICE_URL";
    pub const LOG_FILE: &str = "NHL_API_LOG_FILE";
    pub const HTTP_TIMEOUT: &str = "NHL_API_HTTP_TIMEOUT";
    pub const CACHE_TTL: &str = "NHL_API_CACHE_TTL";
    pub const PRODUCTION: &str = "NHL_API_PRODUCTION";
    pub const ALLOW_PUBLIC: &str = "NHL_API_ALLOW_PUBLIC";
}
