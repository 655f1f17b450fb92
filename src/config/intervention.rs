//! Intervention configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Settings for outbound nudge calls.
#[derive(Debug, Clone, Deserialize)]
pub struct InterventionConfig {
    /// Externally reachable base URL the provider calls back to
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Window in which repeated triggers for the same user and app are
    /// collapsed into one call. Zero disables deduplication.
    #[serde(default = "default_dedup_window")]
    pub dedup_window_secs: u64,

    /// HMAC key for signing callback URLs. Signing is off when unset.
    pub callback_secret: Option<SecretString>,
}

impl InterventionConfig {
    pub fn dedup_window(&self) -> Option<Duration> {
        (self.dedup_window_secs > 0).then(|| Duration::from_secs(self.dedup_window_secs))
    }

    /// Validate intervention configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        let url = self.public_base_url.as_str();
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ValidationError::InvalidUrl("INTERVENTION__PUBLIC_BASE_URL"));
        }
        if production && !url.starts_with("https://") {
            return Err(ValidationError::PublicUrlMustBeHttps);
        }
        Ok(())
    }
}

impl Default for InterventionConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            dedup_window_secs: default_dedup_window(),
            callback_secret: None,
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_dedup_window() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = InterventionConfig::default();
        assert_eq!(config.dedup_window(), Some(Duration::from_secs(300)));
        assert!(config.callback_secret.is_none());
        assert!(config.validate(false).is_ok());
    }

    #[test]
    fn zero_window_disables_dedup() {
        let config = InterventionConfig {
            dedup_window_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.dedup_window(), None);
    }

    #[test]
    fn production_requires_https() {
        let config = InterventionConfig::default();
        assert_eq!(
            config.validate(true),
            Err(ValidationError::PublicUrlMustBeHttps)
        );

        let config = InterventionConfig {
            public_base_url: "https://dial.example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn rejects_schemeless_url() {
        let config = InterventionConfig {
            public_base_url: "dial.example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate(false).is_err());
    }
}
