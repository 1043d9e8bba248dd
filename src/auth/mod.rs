//! Authentication for the Gemini provider.
//!
//! The access mode is resolved once at startup (see
//! [`crate::config::Credentials`]); exactly one manager is built from it
//! and injected into the services. Nothing re-branches on configuration
//! presence per call.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::config::{AuthMethod, Credentials, GeminiConfig};

/// Attaches provider credentials to outgoing requests.
pub trait AuthManager: Send + Sync {
    /// The authentication header, if this mode uses one.
    fn get_auth_header(&self) -> Option<(String, String)>;

    /// The authentication query parameter, if this mode uses one.
    fn get_auth_query_param(&self) -> Option<(String, String)>;

    /// Clone the manager into a boxed trait object.
    fn clone_box(&self) -> Box<dyn AuthManager>;
}

/// API key authentication (Gemini Developer API).
pub struct ApiKeyAuthManager {
    api_key: SecretString,
    auth_method: AuthMethod,
}

impl ApiKeyAuthManager {
    /// Create a new API key auth manager.
    pub fn new(api_key: SecretString, auth_method: AuthMethod) -> Self {
        Self {
            api_key,
            auth_method,
        }
    }
}

impl AuthManager for ApiKeyAuthManager {
    fn get_auth_header(&self) -> Option<(String, String)> {
        match self.auth_method {
            AuthMethod::Header => Some((
                "x-goog-api-key".to_string(),
                self.api_key.expose_secret().to_string(),
            )),
            AuthMethod::QueryParam => None,
        }
    }

    fn get_auth_query_param(&self) -> Option<(String, String)> {
        match self.auth_method {
            AuthMethod::QueryParam => Some((
                "key".to_string(),
                self.api_key.expose_secret().to_string(),
            )),
            AuthMethod::Header => None,
        }
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(Self {
            api_key: self.api_key.clone(),
            auth_method: self.auth_method,
        })
    }
}

/// Bearer token authentication (Vertex AI).
pub struct BearerAuthManager {
    access_token: SecretString,
}

impl BearerAuthManager {
    /// Create a new bearer auth manager.
    pub fn new(access_token: SecretString) -> Self {
        Self { access_token }
    }
}

impl AuthManager for BearerAuthManager {
    fn get_auth_header(&self) -> Option<(String, String)> {
        Some((
            "Authorization".to_string(),
            format!("Bearer {}", self.access_token.expose_secret()),
        ))
    }

    fn get_auth_query_param(&self) -> Option<(String, String)> {
        None
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(Self {
            access_token: self.access_token.clone(),
        })
    }
}

/// Builds the auth manager for the configured access mode.
pub fn auth_manager_for(config: &GeminiConfig) -> Arc<dyn AuthManager> {
    match &config.credentials {
        Credentials::ApiKey(api_key) => Arc::new(ApiKeyAuthManager::new(
            api_key.clone(),
            config.auth_method,
        )),
        Credentials::VertexAi { access_token, .. } => {
            Arc::new(BearerAuthManager::new(access_token.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_auth() {
        let manager = ApiKeyAuthManager::new(
            SecretString::new("test-key".into()),
            AuthMethod::Header,
        );

        let (name, value) = manager.get_auth_header().unwrap();
        assert_eq!(name, "x-goog-api-key");
        assert_eq!(value, "test-key");
        assert!(manager.get_auth_query_param().is_none());
    }

    #[test]
    fn test_query_param_auth() {
        let manager = ApiKeyAuthManager::new(
            SecretString::new("test-key".into()),
            AuthMethod::QueryParam,
        );

        assert!(manager.get_auth_header().is_none());
        let (name, value) = manager.get_auth_query_param().unwrap();
        assert_eq!(name, "key");
        assert_eq!(value, "test-key");
    }

    #[test]
    fn test_bearer_auth() {
        let manager = BearerAuthManager::new(SecretString::new("token-123".into()));

        let (name, value) = manager.get_auth_header().unwrap();
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer token-123");
        assert!(manager.get_auth_query_param().is_none());
    }

    #[test]
    fn test_manager_matches_access_mode() {
        let config = GeminiConfig::builder()
            .api_key(SecretString::new("k".into()))
            .build()
            .unwrap();
        let manager = auth_manager_for(&config);
        assert_eq!(manager.get_auth_header().unwrap().0, "x-goog-api-key");

        let config = GeminiConfig::builder()
            .vertex_ai("p", "us-central1", SecretString::new("t".into()))
            .build()
            .unwrap();
        let manager = auth_manager_for(&config);
        assert_eq!(manager.get_auth_header().unwrap().0, "Authorization");
    }
}
