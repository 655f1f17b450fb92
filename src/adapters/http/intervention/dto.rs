//! HTTP DTOs for intervention endpoints.

use serde::{Deserialize, Serialize};

/// Request body for POST /trigger-intervention.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerInterventionRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
}

/// Response for a trigger. `call_sid` is absent while a concurrent trigger
/// for the same slot is still in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerInterventionResponse {
    pub message: String,
    pub call_sid: Option<String>,
    pub deduplicated: bool,
}

/// Query string the telephony provider sends back to the call-script
/// endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallResponseParams {
    pub user_id: Option<String>,
    pub app_name: Option<String>,
    pub sig: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_request_tolerates_missing_app_name() {
        let req: TriggerInterventionRequest =
            serde_json::from_str(r#"{"user_id": "u1"}"#).unwrap();
        assert_eq!(req.user_id.as_deref(), Some("u1"));
        assert!(req.app_name.is_none());
    }

    #[test]
    fn in_flight_response_serializes_null_sid() {
        let json = serde_json::to_value(TriggerInterventionResponse {
            message: "Call already in progress".to_string(),
            call_sid: None,
            deduplicated: true,
        })
        .unwrap();
        assert!(json["call_sid"].is_null());
        assert_eq!(json["deduplicated"], true);
    }
}
