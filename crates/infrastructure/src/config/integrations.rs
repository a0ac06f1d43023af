//! Integration configuration: FMCSA carrier registry.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// FMCSA QCMobile configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmcsaAppConfig {
    /// API base URL
    #[serde(default = "default_fmcsa_base_url")]
    pub base_url: String,

    /// Web key issued by FMCSA (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub web_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_fmcsa_timeout")]
    pub timeout_secs: u64,
}

fn default_fmcsa_base_url() -> String {
    "https://mobile.fmcsa.dot.gov/qc/services".to_string()
}

const fn default_fmcsa_timeout() -> u64 {
    30
}

impl Default for FmcsaAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_fmcsa_base_url(),
            web_key: None,
            timeout_secs: default_fmcsa_timeout(),
        }
    }
}

impl FmcsaAppConfig {
    /// Convert to `integration_fmcsa` config
    #[must_use]
    pub fn to_fmcsa_config(&self) -> integration_fmcsa::FmcsaConfig {
        integration_fmcsa::FmcsaConfig {
            base_url: self.base_url.clone(),
            web_key: self
                .web_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_client_config() {
        let config = FmcsaAppConfig {
            base_url: "http://localhost:9000".to_string(),
            web_key: Some(SecretString::from("key-123".to_string())),
            timeout_secs: 5,
        };

        let client = config.to_fmcsa_config();
        assert_eq!(client.base_url, "http://localhost:9000");
        assert_eq!(client.web_key.as_deref(), Some("key-123"));
        assert_eq!(client.timeout_secs, 5);
    }

    #[test]
    fn missing_key_stays_missing() {
        let client = FmcsaAppConfig::default().to_fmcsa_config();
        assert!(client.web_key.is_none());
        assert_eq!(client.timeout_secs, 30);
    }
}
