//! Instagram API client implementation.
//!
//! Owns the HTTP transport: URL construction, credential merging into the
//! query string, dispatch, and translation of API error envelopes.

use crate::auth::{AuthManager, AuthMethod};
use crate::config::{InstagramConfig, InstagramConfigBuilder};
use crate::errors::{InstagramError, InstagramErrorKind, InstagramResult};
use crate::services::UsersService;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// API error envelope.
///
/// Errors normally arrive under `meta`; OAuth failures use the same fields at
/// the top level.
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    meta: Option<ErrorMeta>,
    error_type: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorMeta {
    error_type: Option<String>,
    error_message: Option<String>,
}

/// Instagram API client.
pub struct InstagramClient {
    /// HTTP client.
    http: Client,
    /// Configuration.
    config: InstagramConfig,
    /// Authentication manager.
    auth: Arc<AuthManager>,
}

impl InstagramClient {
    /// Creates a new Instagram client.
    pub fn new(config: InstagramConfig) -> InstagramResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool.max_idle_per_host)
            .pool_idle_timeout(config.pool.idle_timeout)
            .build()
            .map_err(|e| {
                InstagramError::new(
                    InstagramErrorKind::InvalidConfiguration,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        let auth = Arc::new(AuthManager::new(config.auth.clone().ok_or_else(|| {
            InstagramError::new(InstagramErrorKind::MissingAuth, "Authentication required")
        })?));

        Ok(Self { http, config, auth })
    }

    /// Creates a new client builder.
    pub fn builder() -> InstagramClientBuilder {
        InstagramClientBuilder::new()
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // Service accessors

    /// Gets the users service.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    // HTTP methods

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> InstagramResult<T> {
        self.get_with_query(path, &[]).await
    }

    /// Makes a GET request with query parameters.
    ///
    /// Credential parameters are merged in first; caller pairs are layered on
    /// top, last write winning per key, so repeating a merge never duplicates
    /// parameters.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> InstagramResult<T> {
        let url = self.request_url(path, query)?;

        debug!(path, auth = self.auth.method().token_prefix(), "dispatching GET");

        let response = self
            .http
            .get(url.as_str())
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InstagramError::timeout(format!("Request timed out: {}", e))
                } else if e.is_connect() {
                    InstagramError::new(
                        InstagramErrorKind::ConnectionFailed,
                        format!("Connection failed: {}", e),
                    )
                } else {
                    InstagramError::new(
                        InstagramErrorKind::Unknown,
                        format!("Request failed: {}", e),
                    )
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "request rejected");
            return Err(Self::handle_error_response(response).await);
        }

        response.json().await.map_err(|e| {
            InstagramError::deserialization(format!("Failed to deserialize response: {}", e))
        })
    }

    // Internal methods

    fn request_url(&self, path: &str, query: &[(String, String)]) -> InstagramResult<String> {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');

        let merged = self.merge_query(query);
        let query_string = serde_urlencoded::to_string(&merged).map_err(|e| {
            InstagramError::new(
                InstagramErrorKind::InvalidParameter,
                format!("Failed to encode query parameters: {}", e),
            )
        })?;

        if query_string.is_empty() {
            Ok(format!("{}/{}", base, path))
        } else {
            Ok(format!("{}/{}?{}", base, path, query_string))
        }
    }

    /// Merges credential parameters with caller parameters.
    ///
    /// Caller pairs win on key collision; keys come out in stable order.
    fn merge_query(&self, query: &[(String, String)]) -> Vec<(String, String)> {
        let mut merged: BTreeMap<String, String> = BTreeMap::new();
        for (key, value) in self.auth.auth_params() {
            merged.insert(key, value);
        }
        for (key, value) in query {
            merged.insert(key.clone(), value.clone());
        }
        merged.into_iter().collect()
    }

    async fn handle_error_response(response: Response) -> InstagramError {
        let status = response.status().as_u16();

        let envelope = response.json::<ErrorEnvelope>().await.ok();
        let (error_type, message) = match envelope {
            Some(ErrorEnvelope {
                meta: Some(meta), ..
            }) => (meta.error_type, meta.error_message),
            Some(envelope) => (envelope.error_type, envelope.error_message),
            None => (None, None),
        };

        let message = message.unwrap_or_else(|| format!("HTTP {} error", status));
        InstagramError::from_response(status, error_type, message)
    }
}

/// Builder for InstagramClient.
pub struct InstagramClientBuilder {
    config_builder: InstagramConfigBuilder,
}

impl InstagramClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: InstagramConfig::builder(),
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.config_builder = self.config_builder.auth(auth);
        self
    }

    /// Sets an access token.
    pub fn access_token(self, token: impl Into<String>) -> Self {
        self.auth(AuthMethod::access_token(token))
    }

    /// Sets an application client ID.
    pub fn client_id(self, id: impl Into<String>) -> Self {
        self.auth(AuthMethod::client_id(id))
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Builds the client.
    pub fn build(self) -> InstagramResult<InstagramClient> {
        let config = self.config_builder.build()?;
        InstagramClient::new(config)
    }
}

impl Default for InstagramClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
