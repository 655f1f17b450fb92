//! GetCallScript - Query handler for the script a call speaks.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::intervention::{CallScriptComposer, CallbackSigner, DEFAULT_SCRIPT_APP_NAME};
use crate::ports::ProfileStore;

/// Parameters the provider echoes back from the callback URL.
#[derive(Debug, Clone, Default)]
pub struct GetCallScriptQuery {
    pub user_id: Option<String>,
    pub app_name: Option<String>,
    pub signature: Option<String>,
}

/// Handler that renders the spoken message for a callback.
///
/// Lookup problems never fail the call: an unknown user or a store error
/// is spoken as an "Unknown" type. Only a bad signature is rejected.
pub struct GetCallScriptHandler {
    store: Arc<dyn ProfileStore>,
    signer: Option<CallbackSigner>,
}

impl GetCallScriptHandler {
    pub fn new(store: Arc<dyn ProfileStore>, signer: Option<CallbackSigner>) -> Self {
        Self { store, signer }
    }

    pub async fn handle(&self, query: GetCallScriptQuery) -> Result<String, DomainError> {
        if let Some(signer) = &self.signer {
            let user_id = query.user_id.as_deref().unwrap_or_default();
            let app_name = query.app_name.as_deref().unwrap_or_default();
            let valid = query
                .signature
                .as_deref()
                .is_some_and(|sig| signer.verify(user_id, app_name, sig));
            if !valid {
                tracing::warn!(user_id = %user_id, "Rejected call script request with bad signature");
                return Err(DomainError::new(
                    ErrorCode::InvalidSignature,
                    "Invalid callback signature",
                ));
            }
        }

        let app_name = query
            .app_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_SCRIPT_APP_NAME);

        let mbti_type = match query.user_id.as_deref().map(UserId::new) {
            Some(Ok(user_id)) => match self.store.get(&user_id).await {
                Ok(profile) => profile.map(|p| p.mbti_type().as_str().to_string()),
                Err(err) => {
                    tracing::warn!(user_id = %user_id, error = %err, "Profile lookup failed for call script");
                    None
                }
            },
            _ => None,
        };

        Ok(CallScriptComposer::compose(mbti_type.as_deref(), app_name))
    }
}
