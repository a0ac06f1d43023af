//! Security configuration: the shared API key for protected routes.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Security configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared key callers present in `X-API-Key`
    ///
    /// When unset, every request to a protected route is rejected.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

impl SecurityConfig {
    /// Whether a non-empty API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }
}
