//! Twilio telephony adapter.
//!
//! Implements `TelephonyProvider` with the Twilio Programmable Voice REST
//! API. A call is created with a `Url` the provider fetches once the callee
//! answers; the voice script is served by our own call-script endpoint.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TwilioConfig::new(account_sid, auth_token, from_number);
//! let adapter = TwilioTelephonyAdapter::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::config::TelephonyConfig;
use crate::domain::foundation::CallSessionId;
use crate::ports::{
    OutboundCallRequest, PlacedCall, TelephonyError, TelephonyErrorCode, TelephonyProvider,
};

const DEFAULT_API_BASE_URL: &str = "https://api.twilio.com";

/// Twilio error codes for destination numbers that cannot be dialled.
const INVALID_NUMBER_CODES: [i64; 4] = [21211, 21214, 21215, 21217];

/// Twilio API configuration.
#[derive(Clone)]
pub struct TwilioConfig {
    account_sid: String,
    auth_token: SecretString,
    from_number: String,
    api_base_url: String,
    request_timeout: Duration,
}

impl TwilioConfig {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: SecretString::new(auth_token.into()),
            from_number: from_number.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_base_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

impl From<&TelephonyConfig> for TwilioConfig {
    fn from(config: &TelephonyConfig) -> Self {
        Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            api_base_url: config.api_base_url.clone(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// Twilio telephony adapter.
pub struct TwilioTelephonyAdapter {
    config: TwilioConfig,
    http_client: reqwest::Client,
}

impl TwilioTelephonyAdapter {
    /// Create an adapter whose requests are bounded by the configured timeout.
    pub fn new(config: TwilioConfig) -> Result<Self, TelephonyError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TelephonyError::provider(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TwilioCall {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Maps a non-success response to a `TelephonyError`.
fn map_error_response(status: StatusCode, body: &str) -> TelephonyError {
    let parsed: TwilioErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| format!("Twilio API error ({})", status));

    let code = match (status, parsed.code) {
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
            TelephonyErrorCode::AuthenticationError
        }
        (StatusCode::TOO_MANY_REQUESTS, _) => TelephonyErrorCode::RateLimitExceeded,
        (_, Some(code)) if INVALID_NUMBER_CODES.contains(&code) => TelephonyErrorCode::InvalidNumber,
        _ => TelephonyErrorCode::ProviderError,
    };

    let mut error = TelephonyError::new(code, message);
    if code == TelephonyErrorCode::ProviderError && status.is_client_error() {
        error.retryable = false;
    }
    if let Some(provider_code) = parsed.code {
        error = error.with_provider_code(provider_code.to_string());
    }
    error
}

fn map_transport_error(e: reqwest::Error) -> TelephonyError {
    if e.is_timeout() {
        TelephonyError::timeout(format!("Twilio request timed out: {}", e))
    } else {
        TelephonyError::network(e.to_string())
    }
}

#[async_trait]
impl TelephonyProvider for TwilioTelephonyAdapter {
    async fn place_call(&self, request: OutboundCallRequest) -> Result<PlacedCall, TelephonyError> {
        // The Calls resource has no idempotency header; dedup happens upstream.
        let params = [
            ("To", request.to.as_str()),
            ("From", self.config.from_number.as_str()),
            ("Url", request.callback_url.as_str()),
            ("Method", request.callback_method.as_str()),
        ];

        let response = self
            .http_client
            .post(self.config.calls_url())
            .basic_auth(
                &self.config.account_sid,
                Some(self.config.auth_token.expose_secret()),
            )
            .form(&params)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = map_error_response(status, &body);
            tracing::error!(
                status = %status,
                provider_code = ?error.provider_code,
                error = %error.message,
                "Twilio create call failed"
            );
            return Err(error);
        }

        let call: TwilioCall = response.json().await.map_err(|e| {
            TelephonyError::provider(format!("Failed to parse Twilio response: {}", e))
        })?;
        let call_sid = CallSessionId::new(call.sid)
            .map_err(|e| TelephonyError::provider(format!("Twilio returned no call sid: {}", e)))?;

        Ok(PlacedCall {
            call_sid,
            status: call.status.unwrap_or_else(|| "queued".to_string()),
        })
    }
}
