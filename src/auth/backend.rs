use crate::auth::gate::key_prefix;
use crate::error::AppError;
use crate::models::Customer;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// External service resolving an API key to a customer record.
///
/// `Ok(None)` means the key is unknown or explicitly invalid; `Err` means
/// the backend itself failed (timeout, transport, non-2xx), which the auth
/// gate treats differently from an invalid key.
pub trait CredentialBackend {
    fn lookup_customer(
        &self,
        api_key: &str,
    ) -> impl Future<Output = Result<Option<Customer>, AppError>> + Send;
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    key: &'a str,
}

/// Customer metadata attached to a key by the key service. All fields are
/// optional; defaults follow the service's conventions.
#[derive(Debug, Deserialize)]
struct KeyMeta {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    plan: Option<String>,
    #[serde(default)]
    active: Option<bool>,
    #[serde(default, rename = "ownerId")]
    owner_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    valid: bool,
    #[serde(default)]
    meta: Option<KeyMeta>,
    #[serde(default)]
    remaining: Option<i64>,
}

/// Key-service backed credential lookup over HTTP.
///
/// Posts the key to a verification endpoint and maps the response's
/// metadata onto a [`Customer`]. The client's timeout bounds the call, so
/// a stuck backend degrades instead of hanging the request.
#[derive(Debug, Clone)]
pub struct HttpKeyService {
    client: Client,
    url: String,
}

impl HttpKeyService {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl CredentialBackend for HttpKeyService {
    #[instrument(skip(self, api_key))]
    async fn lookup_customer(&self, api_key: &str) -> Result<Option<Customer>, AppError> {
        debug!("Verifying key {} with key service", key_prefix(api_key));

        let response = self
            .client
            .post(&self.url)
            .json(&VerifyRequest { key: api_key })
            .send()
            .await
            .map_err(|e| {
                warn!("Key service request failed: {}", e);
                AppError::AuthBackendError
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Key service returned status {}", status);
            return Err(AppError::AuthBackendError);
        }

        let verify: VerifyResponse = response.json().await.map_err(|e| {
            warn!("Key service returned malformed response: {}", e);
            AppError::AuthBackendError
        })?;

        if !verify.valid {
            info!("Key {} rejected by key service", key_prefix(api_key));
            return Ok(None);
        }

        let meta = verify.meta;
        let customer = Customer {
            name: meta
                .as_ref()
                .and_then(|m| m.name.clone())
                .unwrap_or_else(|| "Unknown User".to_string()),
            plan: meta
                .as_ref()
                .and_then(|m| m.plan.clone())
                .unwrap_or_else(|| "free".to_string()),
            // Keys default to active unless the metadata says otherwise
            active: meta.as_ref().and_then(|m| m.active).unwrap_or(true),
            owner_id: meta.and_then(|m| m.owner_id),
            remaining: verify.remaining,
            expires_at: None,
        };

        info!(
            "Key {} verified: user={}, plan={}, active={}",
            key_prefix(api_key),
            customer.name,
            customer.plan,
            customer.active
        );

        Ok(Some(customer))
    }
}

/// Credential backend selected by configuration: a real key service when
/// an endpoint is configured, otherwise the unconfigured placeholder.
#[derive(Debug, Clone)]
pub enum KeyBackend {
    Http(HttpKeyService),
    Unconfigured(UnconfiguredBackend),
}

impl CredentialBackend for KeyBackend {
    async fn lookup_customer(&self, api_key: &str) -> Result<Option<Customer>, AppError> {
        match self {
            KeyBackend::Http(service) => service.lookup_customer(api_key).await,
            KeyBackend::Unconfigured(backend) => backend.lookup_customer(api_key).await,
        }
    }
}

/// Placeholder backend used when no key service is configured.
///
/// Always reports a backend error, so outside production the gate degrades
/// to the development customer and in production every non-development key
/// is refused.
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredBackend;

impl CredentialBackend for UnconfiguredBackend {
    async fn lookup_customer(&self, _api_key: &str) -> Result<Option<Customer>, AppError> {
        warn!("No credential backend configured");
        Err(AppError::AuthBackendError)
    }
}
