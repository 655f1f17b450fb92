//! TriggerIntervention - Command handler that places a nudge call.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{CallSessionId, CommandMetadata, DomainError, ErrorCode, UserId};
use crate::domain::intervention::{CallScriptComposer, InterventionKey, DEFAULT_TRIGGER_APP_NAME};
use crate::ports::{
    CallbackMethod, ClaimOutcome, InterventionGuard, OutboundCallRequest, ProfileStore,
    TelephonyProvider,
};

use super::CallbackUrlBuilder;

/// Command to nudge a user who just opened an app they are avoiding.
#[derive(Debug, Clone)]
pub struct TriggerInterventionCommand {
    pub user_id: UserId,
    /// Defaults to "this app".
    pub app_name: Option<String>,
}

/// What the trigger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A new call was accepted by the provider.
    Placed(CallSessionId),
    /// A call was already placed in this window.
    Duplicate(CallSessionId),
    /// Another trigger in this window is still talking to the provider.
    InFlight,
}

impl TriggerOutcome {
    pub fn call_sid(&self) -> Option<&CallSessionId> {
        match self {
            TriggerOutcome::Placed(sid) | TriggerOutcome::Duplicate(sid) => Some(sid),
            TriggerOutcome::InFlight => None,
        }
    }

    pub fn is_deduplicated(&self) -> bool {
        !matches!(self, TriggerOutcome::Placed(_))
    }
}

/// Result of a trigger.
#[derive(Debug, Clone)]
pub struct TriggerInterventionResult {
    pub outcome: TriggerOutcome,
    /// The message the call will speak.
    pub script: String,
}

/// Handler for intervention triggers.
///
/// Looks up the profile, checks contact details, claims the dedup slot and
/// asks the provider to call. Provider failures release the slot; nothing
/// is retried automatically.
pub struct TriggerInterventionHandler {
    store: Arc<dyn ProfileStore>,
    telephony: Arc<dyn TelephonyProvider>,
    guard: Arc<dyn InterventionGuard>,
    callback: CallbackUrlBuilder,
    dedup_window: Option<Duration>,
}

impl TriggerInterventionHandler {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        telephony: Arc<dyn TelephonyProvider>,
        guard: Arc<dyn InterventionGuard>,
        callback: CallbackUrlBuilder,
        dedup_window: Option<Duration>,
    ) -> Self {
        Self {
            store,
            telephony,
            guard,
            callback,
            dedup_window,
        }
    }

    pub async fn handle(
        &self,
        cmd: TriggerInterventionCommand,
        metadata: CommandMetadata,
    ) -> Result<TriggerInterventionResult, DomainError> {
        let app_name = cmd
            .app_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TRIGGER_APP_NAME.to_string());

        // 1. Profile must exist
        let profile = self
            .store
            .get(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::profile_not_found(&cmd.user_id))?;

        // 2. Profile must carry a phone number
        let phone = profile.phone_number().cloned().ok_or_else(|| {
            DomainError::new(
                ErrorCode::MissingContact,
                "User does not have a phone number on file",
            )
            .with_detail("user_id", cmd.user_id.to_string())
        })?;

        // 3. Compose the script the call will speak
        let script = CallScriptComposer::compose(Some(profile.mbti_type().as_str()), &app_name);
        tracing::info!(
            user_id = %cmd.user_id,
            app_name = %app_name,
            correlation_id = metadata.correlation_id(),
            script = %script,
            "Intervention script composed"
        );

        // 4. Claim the dedup slot; the claim lives for one window
        let key = match self.dedup_window {
            Some(window) => {
                let key = InterventionKey::new(&cmd.user_id, &app_name);
                match self.guard.claim(&key, window).await? {
                    ClaimOutcome::Claimed => Some((key, window)),
                    ClaimOutcome::AlreadyPlaced(sid) => {
                        tracing::info!(user_id = %cmd.user_id, call_sid = %sid, "Duplicate trigger");
                        return Ok(TriggerInterventionResult {
                            outcome: TriggerOutcome::Duplicate(sid),
                            script,
                        });
                    }
                    ClaimOutcome::InFlight => {
                        tracing::info!(user_id = %cmd.user_id, "Trigger already in flight");
                        return Ok(TriggerInterventionResult {
                            outcome: TriggerOutcome::InFlight,
                            script,
                        });
                    }
                }
            }
            None => None,
        };

        // 5. Place the call
        let request = OutboundCallRequest {
            to: phone,
            callback_url: self.callback.build(&cmd.user_id, &app_name),
            callback_method: CallbackMethod::Get,
        };

        let placed = match self.telephony.place_call(request).await {
            Ok(placed) => placed,
            Err(err) => {
                tracing::warn!(
                    user_id = %cmd.user_id,
                    error = %err,
                    retryable = err.retryable,
                    "Telephony provider rejected call"
                );
                if let Some((key, _)) = &key {
                    if let Err(release_err) = self.guard.release(key).await {
                        tracing::warn!(error = %release_err, "Failed to release intervention claim");
                    }
                }
                return Err(err.into());
            }
        };

        // 6. Remember the call for the rest of the window
        if let Some((key, window)) = &key {
            if let Err(err) = self.guard.complete(key, &placed.call_sid, *window).await {
                tracing::warn!(error = %err, "Failed to record placed call");
            }
        }

        tracing::info!(
            user_id = %cmd.user_id,
            call_sid = %placed.call_sid,
            status = %placed.status,
            "Call initiated"
        );

        Ok(TriggerInterventionResult {
            outcome: TriggerOutcome::Placed(placed.call_sid),
            script,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::idempotency::InMemoryInterventionGuard;
    use crate::adapters::profile::InMemoryProfileStore;
    use crate::adapters::telephony::MockTelephonyProvider;
    use crate::domain::foundation::Timestamp;
    use crate::domain::survey::{QuestionBank, ScoringEngine, TieBreak};
    use crate::domain::user::{PhoneNumber, Profile};
    use crate::ports::TelephonyError;

    const WINDOW: Duration = Duration::from_secs(300);

    struct Fixture {
        store: Arc<InMemoryProfileStore>,
        telephony: Arc<MockTelephonyProvider>,
        handler: TriggerInterventionHandler,
    }

    fn fixture(window: Option<Duration>) -> Fixture {
        let store = Arc::new(InMemoryProfileStore::new());
        let telephony = Arc::new(MockTelephonyProvider::new());
        let guard = Arc::new(InMemoryInterventionGuard::new());
        let callback = CallbackUrlBuilder::new("https://dial.example.com", None).unwrap();
        let handler = TriggerInterventionHandler::new(
            store.clone(),
            telephony.clone(),
            guard,
            callback,
            window,
        );
        Fixture {
            store,
            telephony,
            handler,
        }
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    async fn seed(store: &InMemoryProfileStore, phone: Option<&str>) {
        let bank = QuestionBank::standard();
        let traits = ScoringEngine::new(&bank, TieBreak::SecondPole)
            .score(&[])
            .unwrap();
        let profile = Profile::new(
            user(),
            phone.map(|p| PhoneNumber::new(p).unwrap()),
            traits,
            Timestamp::now(),
        );
        store.upsert(&profile).await.unwrap();
    }

    fn command(app: Option<&str>) -> TriggerInterventionCommand {
        TriggerInterventionCommand {
            user_id: user(),
            app_name: app.map(String::from),
        }
    }

    #[tokio::test]
    async fn places_call_with_callback_url() {
        let f = fixture(Some(WINDOW));
        seed(&f.store, Some("+15550001111")).await;

        let result = f
            .handler
            .handle(command(Some("TikTok")), CommandMetadata::new(user()))
            .await
            .unwrap();

        assert!(matches!(result.outcome, TriggerOutcome::Placed(_)));
        assert!(result.script.contains("TikTok"));
        assert!(result.script.contains("INFP"));

        let calls = f.telephony.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].to.as_str(), "+15550001111");
        assert_eq!(calls[0].callback_method, CallbackMethod::Get);
        assert_eq!(
            calls[0].callback_url,
            "https://dial.example.com/call-response?user_id=user-1&app_name=TikTok"
        );
    }

    #[tokio::test]
    async fn defaults_app_name() {
        let f = fixture(None);
        seed(&f.store, Some("+15550001111")).await;

        let result = f
            .handler
            .handle(command(None), CommandMetadata::new(user()))
            .await
            .unwrap();

        assert!(result.script.contains("use this app again"));
        assert!(f.telephony.calls()[0].callback_url.ends_with("app_name=this+app"));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found_and_not_called() {
        let f = fixture(Some(WINDOW));

        let err = f
            .handler
            .handle(command(Some("TikTok")), CommandMetadata::new(user()))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProfileNotFound);
        assert_eq!(f.telephony.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_phone_is_rejected_and_not_called() {
        let f = fixture(Some(WINDOW));
        seed(&f.store, None).await;

        let err = f
            .handler
            .handle(command(Some("TikTok")), CommandMetadata::new(user()))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::MissingContact);
        assert_eq!(err.message, "User does not have a phone number on file");
        assert_eq!(f.telephony.call_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_in_window_places_one_call() {
        let f = fixture(Some(WINDOW));
        seed(&f.store, Some("+15550001111")).await;

        let first = f
            .handler
            .handle(command(Some("TikTok")), CommandMetadata::new(user()))
            .await
            .unwrap();
        let second = f
            .handler
            .handle(command(Some("TikTok")), CommandMetadata::new(user()))
            .await
            .unwrap();

        assert_eq!(f.telephony.call_count(), 1);
        assert!(!first.outcome.is_deduplicated());
        assert_eq!(
            second.outcome,
            TriggerOutcome::Duplicate(first.outcome.call_sid().unwrap().clone())
        );
    }

    #[tokio::test]
    async fn other_app_calls_again() {
        let f = fixture(Some(WINDOW));
        seed(&f.store, Some("+15550001111")).await;
        let meta = || CommandMetadata::new(user());

        f.handler.handle(command(Some("TikTok")), meta()).await.unwrap();
        f.handler.handle(command(Some("Instagram")), meta()).await.unwrap();
        f.handler.handle(command(Some("TikTok")), meta()).await.unwrap();

        assert_eq!(f.telephony.call_count(), 2);
    }

    #[tokio::test]
    async fn window_is_measured_from_the_placed_call() {
        let window = Duration::from_millis(300);
        let f = fixture(Some(window));
        seed(&f.store, Some("+15550001111")).await;
        let meta = || CommandMetadata::new(user());

        f.handler.handle(command(Some("TikTok")), meta()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        let repeat = f.handler.handle(command(Some("TikTok")), meta()).await.unwrap();
        assert!(repeat.outcome.is_deduplicated());
        assert_eq!(f.telephony.call_count(), 1);

        tokio::time::sleep(Duration::from_millis(350)).await;
        let later = f.handler.handle(command(Some("TikTok")), meta()).await.unwrap();
        assert!(matches!(later.outcome, TriggerOutcome::Placed(_)));
        assert_eq!(f.telephony.call_count(), 2);
    }

    #[tokio::test]
    async fn disabled_window_never_deduplicates() {
        let f = fixture(None);
        seed(&f.store, Some("+15550001111")).await;

        for _ in 0..2 {
            f.handler
                .handle(command(Some("TikTok")), CommandMetadata::new(user()))
                .await
                .unwrap();
        }

        assert_eq!(f.telephony.call_count(), 2);
    }

    #[tokio::test]
    async fn provider_failure_releases_claim() {
        let f = fixture(Some(WINDOW));
        seed(&f.store, Some("+15550001111")).await;
        f.telephony.fail_next(TelephonyError::network("connection reset"));

        let err = f
            .handler
            .handle(command(Some("TikTok")), CommandMetadata::new(user()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamError);

        let retry = f
            .handler
            .handle(command(Some("TikTok")), CommandMetadata::new(user()))
            .await
            .unwrap();
        assert!(matches!(retry.outcome, TriggerOutcome::Placed(_)));
        assert_eq!(f.telephony.call_count(), 1);
    }
}
