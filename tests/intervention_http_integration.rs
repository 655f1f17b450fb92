//! Integration tests for the intervention HTTP endpoints.
//!
//! Covers the trigger flow end to end against the mock provider, the
//! duplicate-call guard and the signed call-script callback.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use reqwest::Url;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use detox_dial::adapters::http::{app_router, AppState};
use detox_dial::adapters::idempotency::InMemoryInterventionGuard;
use detox_dial::adapters::profile::InMemoryProfileStore;
use detox_dial::adapters::telephony::MockTelephonyProvider;
use detox_dial::application::handlers::CallbackUrlBuilder;
use detox_dial::config::ServerConfig;
use detox_dial::domain::foundation::{Timestamp, UserId};
use detox_dial::domain::intervention::CallbackSigner;
use detox_dial::domain::survey::{AxisScores, TieBreak, TraitAxis, TraitProfile};
use detox_dial::domain::user::{PhoneNumber, Profile};
use detox_dial::ports::{ProfileStore, TelephonyError};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SECRET: &str = "test-callback-secret";

struct TestApp {
    router: Router,
    store: Arc<InMemoryProfileStore>,
    telephony: MockTelephonyProvider,
}

fn test_app(signed: bool, dedup_window: Option<Duration>) -> TestApp {
    let store = Arc::new(InMemoryProfileStore::new());
    let telephony = MockTelephonyProvider::new();
    let signer = signed
        .then(|| CallbackSigner::new(&SecretString::new(SECRET.to_string())).unwrap());
    let state = AppState {
        question_bank: Arc::new(detox_dial::domain::survey::QuestionBank::standard()),
        profile_store: store.clone(),
        telephony: Arc::new(telephony.clone()),
        intervention_guard: Arc::new(InMemoryInterventionGuard::new()),
        callback_urls: CallbackUrlBuilder::new("https://detox.example.com", signer).unwrap(),
        dedup_window,
        tie_break: TieBreak::SecondPole,
    };
    TestApp {
        router: app_router(state, &ServerConfig::default()),
        store,
        telephony,
    }
}

/// INTJ: introvert, intuitive, thinking, judging.
fn intj_traits() -> TraitProfile {
    let mut scores = AxisScores::default();
    scores.add(TraitAxis::Extraversion, -4);
    scores.add(TraitAxis::Intuition, -4);
    scores.add(TraitAxis::Feeling, 4);
    scores.add(TraitAxis::Perceiving, 4);
    TraitProfile::from_scores(&scores, 16, TieBreak::SecondPole)
}

async fn seed(store: &InMemoryProfileStore, user: &str, phone: Option<&str>) {
    let profile = Profile::new(
        UserId::new(user).unwrap(),
        phone.map(|p| PhoneNumber::new(p).unwrap()),
        intj_traits(),
        Timestamp::now(),
    );
    store.upsert(&profile).await.unwrap();
}

async fn trigger(router: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/trigger-intervention")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn fetch_script(router: Router, method: &str, uri: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Path and query of the callback URL the provider was handed.
fn callback_path(url: &str) -> String {
    let url = Url::parse(url).unwrap();
    format!("{}?{}", url.path(), url.query().unwrap_or_default())
}

// =============================================================================
// POST /trigger-intervention
// =============================================================================

#[tokio::test]
async fn trigger_places_call_to_stored_number() {
    let app = test_app(false, None);
    seed(&app.store, "u1", Some("+1 (555) 123-4567")).await;

    let (status, json) = trigger(
        app.router,
        json!({"user_id": "u1", "app_name": "Instagram"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Call initiated");
    assert_eq!(json["deduplicated"], false);
    assert!(json["call_sid"].as_str().unwrap().starts_with("CA"));

    let calls = app.telephony.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to.as_str(), "+15551234567");
    assert!(calls[0].callback_url.contains("/call-response?"));
    assert!(calls[0].callback_url.contains("app_name=Instagram"));
}

#[tokio::test]
async fn trigger_without_phone_is_rejected_and_no_call_is_placed() {
    let app = test_app(false, None);
    seed(&app.store, "u2", None).await;

    let (status, json) = trigger(app.router, json!({"user_id": "u2"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MISSING_CONTACT");
    assert_eq!(app.telephony.call_count(), 0);
}

#[tokio::test]
async fn trigger_for_unknown_user_is_not_found() {
    let app = test_app(false, None);

    let (status, json) = trigger(app.router, json!({"user_id": "ghost"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "PROFILE_NOT_FOUND");
    assert_eq!(app.telephony.call_count(), 0);
}

#[tokio::test]
async fn trigger_without_user_id_is_rejected() {
    let app = test_app(false, None);

    let (status, json) = trigger(app.router, json!({"app_name": "TikTok"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Missing user_id");
}

#[tokio::test]
async fn repeated_trigger_within_window_places_one_call() {
    let app = test_app(false, Some(Duration::from_secs(300)));
    seed(&app.store, "u3", Some("+15550001111")).await;
    let body = json!({"user_id": "u3", "app_name": "TikTok"});

    let (first_status, first) = trigger(app.router.clone(), body.clone()).await;
    let (second_status, second) = trigger(app.router, body).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(second["deduplicated"], true);
    assert_eq!(first["call_sid"], second["call_sid"]);
    assert_eq!(app.telephony.call_count(), 1);
}

#[tokio::test]
async fn different_apps_are_not_deduplicated() {
    let app = test_app(false, Some(Duration::from_secs(300)));
    seed(&app.store, "u4", Some("+15550002222")).await;

    trigger(app.router.clone(), json!({"user_id": "u4", "app_name": "TikTok"})).await;
    let (_, json) = trigger(app.router, json!({"user_id": "u4", "app_name": "YouTube"})).await;

    assert_eq!(json["deduplicated"], false);
    assert_eq!(app.telephony.call_count(), 2);
}

#[tokio::test]
async fn provider_failure_releases_slot_for_retry() {
    let app = test_app(false, Some(Duration::from_secs(300)));
    seed(&app.store, "u5", Some("+15550003333")).await;
    app.telephony
        .fail_next(TelephonyError::provider("Service unavailable"));
    let body = json!({"user_id": "u5", "app_name": "Reddit"});

    let (failed_status, failed) = trigger(app.router.clone(), body.clone()).await;
    let (retry_status, retry) = trigger(app.router, body).await;

    assert_eq!(failed_status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(failed["code"], "UPSTREAM_ERROR");
    assert_eq!(retry_status, StatusCode::OK);
    assert_eq!(retry["deduplicated"], false);
    assert_eq!(app.telephony.call_count(), 1);
}

// =============================================================================
// GET|POST /call-response
// =============================================================================

#[tokio::test]
async fn call_script_speaks_type_and_app() {
    let app = test_app(false, None);
    seed(&app.store, "u6", Some("+15550004444")).await;

    let (status, content_type, body) = fetch_script(
        app.router,
        "GET",
        "/call-response?user_id=u6&app_name=Instagram",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/xml"));
    assert!(body.starts_with("<?xml"));
    assert!(body.contains(r#"<Say voice="alice">"#));
    assert!(body.contains("Instagram"));
    assert!(body.contains("As a INTJ"));
    assert!(body.ends_with("<Hangup/></Response>"));
}

#[tokio::test]
async fn call_script_for_unknown_user_degrades_to_unknown() {
    let app = test_app(false, None);

    let (status, _, body) = fetch_script(
        app.router,
        "POST",
        "/call-response?user_id=nobody&app_name=Instagram",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Instagram"));
    assert!(body.contains("Unknown"));
}

#[tokio::test]
async fn call_script_defaults_app_name() {
    let app = test_app(false, None);

    let (_, _, body) = fetch_script(app.router, "GET", "/call-response").await;

    assert!(body.contains("that app"));
    assert!(body.contains("Unknown"));
}

#[tokio::test]
async fn signed_callback_url_round_trips() {
    let app = test_app(true, None);
    seed(&app.store, "u7", Some("+15550005555")).await;

    let (status, _) = trigger(
        app.router.clone(),
        json!({"user_id": "u7", "app_name": "Candy Crush"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let url = app.telephony.calls()[0].callback_url.clone();
    assert!(url.contains("sig="));
    let (status, _, body) = fetch_script(app.router, "GET", &callback_path(&url)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Candy Crush"));
    assert!(body.contains("INTJ"));
}

#[tokio::test]
async fn unsigned_or_tampered_callback_is_forbidden() {
    let app = test_app(true, None);
    seed(&app.store, "u8", Some("+15550006666")).await;

    let (missing, _, _) = fetch_script(
        app.router.clone(),
        "GET",
        "/call-response?user_id=u8&app_name=Instagram",
    )
    .await;

    let signer = CallbackSigner::new(&SecretString::new(SECRET.to_string())).unwrap();
    let sig = signer.sign("u8", "Instagram");
    let (tampered, _, body) = fetch_script(
        app.router,
        "GET",
        &format!("/call-response?user_id=u8&app_name=TikTok&sig={}", sig),
    )
    .await;

    assert_eq!(missing, StatusCode::FORBIDDEN);
    assert_eq!(tampered, StatusCode::FORBIDDEN);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["code"], "INVALID_SIGNATURE");
}
