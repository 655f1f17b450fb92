//! Recording telephony provider for development and tests.
//!
//! Never dials anything: each accepted request is logged and answered with a
//! synthetic `CA...` call sid. Errors can be injected for the next call.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::CallSessionId;
use crate::ports::{OutboundCallRequest, PlacedCall, TelephonyError, TelephonyProvider};

/// Mock telephony provider with call tracking and error injection.
#[derive(Clone, Default)]
pub struct MockTelephonyProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Accepted requests, in order.
    calls: Vec<OutboundCallRequest>,

    /// Error to return on next call.
    next_error: Option<TelephonyError>,

    /// Counter used for synthetic sids.
    sequence: u64,
}

impl MockTelephonyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fail the next `place_call` with this error.
    pub fn fail_next(&self, error: TelephonyError) {
        self.state().next_error = Some(error);
    }

    /// Requests accepted so far.
    pub fn calls(&self) -> Vec<OutboundCallRequest> {
        self.state().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }
}

#[async_trait]
impl TelephonyProvider for MockTelephonyProvider {
    async fn place_call(&self, request: OutboundCallRequest) -> Result<PlacedCall, TelephonyError> {
        let mut state = self.state();
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        state.sequence += 1;
        let sid = format!("CA{:032x}", state.sequence);
        tracing::info!(to = %request.to, call_sid = %sid, url = %request.callback_url, "Mock call placed");
        state.calls.push(request);

        let call_sid = CallSessionId::new(sid)
            .map_err(|e| TelephonyError::provider(e.to_string()))?;
        Ok(PlacedCall {
            call_sid,
            status: "queued".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::PhoneNumber;
    use crate::ports::{CallbackMethod, TelephonyErrorCode};

    fn request() -> OutboundCallRequest {
        OutboundCallRequest {
            to: PhoneNumber::new("+15550001111").unwrap(),
            callback_url: "https://dial.example.com/call-response?user_id=u1".to_string(),
            callback_method: CallbackMethod::Get,
        }
    }

    #[tokio::test]
    async fn records_calls_with_unique_sids() {
        let mock = MockTelephonyProvider::new();
        let first = mock.place_call(request()).await.unwrap();
        let second = mock.place_call(request()).await.unwrap();

        assert_ne!(first.call_sid, second.call_sid);
        assert!(first.call_sid.as_str().starts_with("CA"));
        assert_eq!(first.call_sid.as_str().len(), 34);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn injected_error_applies_once() {
        let mock = MockTelephonyProvider::new();
        mock.fail_next(TelephonyError::invalid_number("nope"));

        let err = mock.place_call(request()).await.unwrap_err();
        assert_eq!(err.code, TelephonyErrorCode::InvalidNumber);
        assert_eq!(mock.call_count(), 0);

        assert!(mock.place_call(request()).await.is_ok());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mock = MockTelephonyProvider::new();
        let clone = mock.clone();
        clone.place_call(request()).await.unwrap();
        assert_eq!(mock.calls()[0].to.as_str(), "+15550001111");
    }
}
