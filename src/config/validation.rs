use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings.
///
/// # Validation Rules
/// - Schedule URL cannot be empty and must be an http(s) URL
/// - Key service URL, when set, must be an http(s) URL
/// - Cache TTL and HTTP timeout must be non-zero
/// - If a log file path is provided, its parent directory must exist or be
///   creatable
pub fn validate_config(
    schedule_url: &str,
    key_service_url: &Option<String>,
    cache_ttl_seconds: u64,
    http_timeout_seconds: u64,
    log_file_path: &Option<String>,
) -> Result<(), AppError> {
    if schedule_url.is_empty() {
        return Err(AppError::config_error("Schedule URL cannot be empty"));
    }

    if !schedule_url.starts_with("http://") && !schedule_url.starts_with("https://") {
        return Err(AppError::config_error(
            "Schedule URL must start with http:// or https://",
        ));
    }

    if let Some(url) = key_service_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::config_error(
                "Key service URL must start with http:// or https://",
            ));
        }
    }

    if cache_ttl_seconds == 0 {
        return Err(AppError::config_error("Cache TTL must be greater than 0"));
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be greater than 0",
        ));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.exists()
        {
            // Try to create the directory to validate the path
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
