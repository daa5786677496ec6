use crate::auth::backend::CredentialBackend;
use crate::constants::dev_keys;
use crate::error::AppError;
use crate::models::Customer;
use tracing::{error, info, instrument, warn};

/// Shortened key form safe to log. Responses never carry it.
pub fn key_prefix(api_key: &str) -> String {
    let prefix: String = api_key.chars().take(4).collect();
    format!("{prefix}...")
}

/// Extracts the API key from an `Authorization` header value.
///
/// Accepts both `Bearer <key>` and a bare key. Returns `None` for an
/// empty value, which the gate treats the same as a missing header.
pub fn extract_bearer(header: &str) -> Option<&str> {
    let key = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if key.is_empty() { None } else { Some(key) }
}

/// Static development customers, keyed by well-known local keys.
/// Only consulted outside production.
pub fn dev_customer(api_key: &str) -> Option<Customer> {
    match api_key {
        dev_keys::DEVELOPMENT_KEY => Some(Customer::new("Developer", "unlimited")),
        dev_keys::TEST_KEY => Some(Customer::new("Test User", "basic")),
        _ => None,
    }
}

/// Resolves API keys to customers ahead of every query.
///
/// Policy, in order: static development keys (non-production only), the
/// public-access fallback for keyless requests (non-production only, and
/// only when enabled), then the credential backend. A backend failure
/// degrades to the development customer outside production and fails the
/// request in production.
#[derive(Debug)]
pub struct AuthGate<B> {
    backend: B,
    is_production: bool,
    allow_public: bool,
}

impl<B: CredentialBackend> AuthGate<B> {
    pub fn new(backend: B, is_production: bool, allow_public: bool) -> Self {
        Self {
            backend,
            is_production,
            allow_public,
        }
    }

    /// Resolves the presented key (if any) to a customer, or fails with a
    /// category-level auth error. Every outcome is logged.
    #[instrument(skip(self, api_key))]
    pub async fn resolve(&self, api_key: Option<&str>) -> Result<Customer, AppError> {
        let Some(key) = api_key else {
            if self.allow_public && !self.is_production {
                info!("No API key presented; allowing public access");
                return Ok(Customer::new("Public", "free"));
            }
            warn!("No API key presented; public access not allowed");
            return Err(AppError::MissingApiKey);
        };

        if !self.is_production
            && let Some(customer) = dev_customer(key)
        {
            info!(
                "Authenticated {} via static development key {}",
                customer.name,
                key_prefix(key)
            );
            return Ok(customer);
        }

        match self.backend.lookup_customer(key).await {
            Ok(Some(customer)) if customer.active => {
                info!(
                    "Authenticated key {}: user={}, plan={}",
                    key_prefix(key),
                    customer.name,
                    customer.plan
                );
                Ok(customer)
            }
            Ok(Some(_)) => {
                // Inactive keys are indistinguishable from unknown ones
                warn!("Key {} is inactive", key_prefix(key));
                Err(AppError::InvalidApiKey)
            }
            Ok(None) => {
                warn!("Key {} is unknown", key_prefix(key));
                Err(AppError::InvalidApiKey)
            }
            Err(e) => {
                if !self.is_production {
                    warn!(
                        "Credential backend error ({}); degrading to development customer",
                        e
                    );
                    Ok(dev_customer(dev_keys::DEVELOPMENT_KEY)
                        .unwrap_or_else(|| Customer::new("Developer", "unlimited")))
                } else {
                    error!("Credential backend error in production: {}", e);
                    Err(AppError::AuthBackendError)
                }
            }
        }
    }
}
