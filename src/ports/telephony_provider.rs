//! Telephony provider port for outbound calls.
//!
//! The provider only needs to place a call that, once answered, fetches its
//! voice script from a callback URL. Implementations must bound the time
//! they spend waiting on the provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CallSessionId, DomainError};
use crate::domain::user::PhoneNumber;

/// Port for placing outbound calls.
#[async_trait]
pub trait TelephonyProvider: Send + Sync {
    /// Ask the provider to dial `request.to`.
    ///
    /// Success means the provider accepted the call, not that it was
    /// answered.
    async fn place_call(&self, request: OutboundCallRequest) -> Result<PlacedCall, TelephonyError>;
}

/// HTTP method the provider uses to fetch the call script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallbackMethod {
    #[default]
    Get,
    Post,
}

impl CallbackMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackMethod::Get => "GET",
            CallbackMethod::Post => "POST",
        }
    }
}

/// Request to place one outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCallRequest {
    /// Number to dial.
    pub to: PhoneNumber,

    /// URL the provider fetches the voice script from.
    pub callback_url: String,

    /// Method used for the callback.
    pub callback_method: CallbackMethod,
}

/// A call the provider accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedCall {
    /// Provider call identifier.
    pub call_sid: CallSessionId,

    /// Provider status at acceptance time (e.g. `queued`).
    pub status: String,
}

/// Error from the telephony provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelephonyError {
    /// Error code for categorization.
    pub code: TelephonyErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,

    /// Whether the operation could succeed if tried again later.
    pub retryable: bool,
}

impl TelephonyError {
    pub fn new(code: TelephonyErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TelephonyErrorCode::NetworkError, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TelephonyErrorCode::Timeout, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(TelephonyErrorCode::AuthenticationError, message)
    }

    pub fn invalid_number(message: impl Into<String>) -> Self {
        Self::new(TelephonyErrorCode::InvalidNumber, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(TelephonyErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for TelephonyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for TelephonyError {}

impl From<TelephonyError> for DomainError {
    fn from(err: TelephonyError) -> Self {
        let mut domain = DomainError::upstream("telephony", err.message)
            .with_detail("reason", err.code.to_string())
            .with_detail("retryable", err.retryable.to_string());
        if let Some(code) = err.provider_code {
            domain = domain.with_detail("provider_code", code);
        }
        domain
    }
}

/// Telephony error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelephonyErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Provider did not answer within the configured timeout.
    Timeout,

    /// Credentials rejected.
    AuthenticationError,

    /// Destination number rejected by the provider.
    InvalidNumber,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Any other provider-side failure.
    ProviderError,
}

impl TelephonyErrorCode {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TelephonyErrorCode::NetworkError
                | TelephonyErrorCode::Timeout
                | TelephonyErrorCode::RateLimitExceeded
                | TelephonyErrorCode::ProviderError
        )
    }
}

impl std::fmt::Display for TelephonyErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TelephonyErrorCode::NetworkError => "network_error",
            TelephonyErrorCode::Timeout => "timeout",
            TelephonyErrorCode::AuthenticationError => "authentication_error",
            TelephonyErrorCode::InvalidNumber => "invalid_number",
            TelephonyErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            TelephonyErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
