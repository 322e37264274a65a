//! Authentication for the Instagram API.
//!
//! The legacy API carries the credential as query parameters rather than
//! headers: `access_token` for calls on behalf of a user, `client_id` for
//! endpoints reachable with only an application identity.

use secrecy::{ExposeSecret, SecretString};

/// Authentication method for the Instagram API.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// OAuth access token for calls on behalf of a user.
    AccessToken(SecretString),
    /// Application client ID for unauthenticated endpoints.
    ClientId(SecretString),
}

impl AuthMethod {
    /// Creates an access token authentication method.
    pub fn access_token(token: impl Into<String>) -> Self {
        Self::AccessToken(SecretString::new(token.into()))
    }

    /// Creates a client ID authentication method.
    pub fn client_id(id: impl Into<String>) -> Self {
        Self::ClientId(SecretString::new(id.into()))
    }

    /// Gets a redacted label for logging.
    pub fn token_prefix(&self) -> &'static str {
        match self {
            Self::AccessToken(_) => "access_token:***",
            Self::ClientId(_) => "client_id:***",
        }
    }
}

/// Resolves the credential into outgoing query parameters.
pub struct AuthManager {
    method: AuthMethod,
}

impl AuthManager {
    /// Creates a new authentication manager.
    pub fn new(method: AuthMethod) -> Self {
        Self { method }
    }

    /// Gets the authentication method.
    pub fn method(&self) -> &AuthMethod {
        &self.method
    }

    /// Query parameters carrying the credential.
    pub fn auth_params(&self) -> Vec<(String, String)> {
        match &self.method {
            AuthMethod::AccessToken(token) => {
                vec![("access_token".to_string(), token.expose_secret().to_owned())]
            }
            AuthMethod::ClientId(id) => {
                vec![("client_id".to_string(), id.expose_secret().to_owned())]
            }
        }
    }
}
