//! Telephony configuration (Twilio)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Telephony provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelephonyConfig {
    /// Twilio account SID (`AC...`)
    #[serde(default)]
    pub account_sid: String,

    /// Twilio auth token
    #[serde(default = "empty_secret")]
    pub auth_token: SecretString,

    /// Caller ID for outbound calls
    #[serde(default)]
    pub from_number: String,

    /// REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl TelephonyConfig {
    /// Whether credentials were supplied at all.
    pub fn is_configured(&self) -> bool {
        !self.account_sid.is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate telephony configuration. An unconfigured provider is valid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_configured() {
            return Ok(());
        }
        if !self.account_sid.starts_with("AC") {
            return Err(ValidationError::InvalidAccountSid);
        }
        if self.auth_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("TELEPHONY__AUTH_TOKEN"));
        }
        if self.from_number.is_empty() {
            return Err(ValidationError::MissingRequired("TELEPHONY__FROM_NUMBER"));
        }
        let digits = self.from_number.trim_start_matches('+');
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidFromNumber);
        }
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://")
        {
            return Err(ValidationError::InvalidUrl("TELEPHONY__API_BASE_URL"));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for TelephonyConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: empty_secret(),
            from_number: String::new(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_api_base_url() -> String {
    "https://api.twilio.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
