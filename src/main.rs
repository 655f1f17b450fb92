//! DetoxDial HTTP server.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use detox_dial::adapters::http::{app_router, AppState};
use detox_dial::adapters::idempotency::{InMemoryInterventionGuard, RedisInterventionGuard};
use detox_dial::adapters::profile::{InMemoryProfileStore, PostgresProfileStore};
use detox_dial::adapters::telephony::{MockTelephonyProvider, TwilioConfig, TwilioTelephonyAdapter};
use detox_dial::application::handlers::CallbackUrlBuilder;
use detox_dial::config::AppConfig;
use detox_dial::domain::intervention::CallbackSigner;
use detox_dial::domain::survey::QuestionBank;
use detox_dial::ports::{InterventionGuard, ProfileStore, TelephonyProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let profile_store = profile_store(&config).await?;
    let intervention_guard = intervention_guard(&config).await?;
    let telephony = telephony_provider(&config)?;

    let signer = config
        .intervention
        .callback_secret
        .as_ref()
        .map(CallbackSigner::new)
        .transpose()?;
    if signer.is_none() {
        tracing::warn!("No callback secret configured; call-script requests are not signed");
    }
    let callback_urls = CallbackUrlBuilder::new(&config.intervention.public_base_url, signer)?;

    let state = AppState {
        question_bank: Arc::new(QuestionBank::standard()),
        profile_store,
        telephony,
        intervention_guard,
        callback_urls,
        dedup_window: config.intervention.dedup_window(),
        tie_break: config.scoring.tie_break,
    };

    let app = app_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        address = %addr,
        environment = ?config.server.environment,
        "DetoxDial backend listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn profile_store(config: &AppConfig) -> Result<Arc<dyn ProfileStore>, Box<dyn Error>> {
    let Some(url) = config.database.url.as_deref() else {
        tracing::warn!("No database configured; profiles are kept in memory");
        return Ok(Arc::new(InMemoryProfileStore::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(url)
        .await?;
    let store = PostgresProfileStore::new(pool);
    if config.database.run_migrations {
        store.migrate().await?;
    }
    tracing::info!("Profile store: PostgreSQL");
    Ok(Arc::new(store))
}

async fn intervention_guard(
    config: &AppConfig,
) -> Result<Arc<dyn InterventionGuard>, Box<dyn Error>> {
    let Some(url) = config.redis.url.as_deref() else {
        tracing::warn!("No Redis configured; duplicate-call guard is process-local");
        return Ok(Arc::new(InMemoryInterventionGuard::new()));
    };

    let client = redis::Client::open(url)?;
    let conn = client.get_multiplexed_tokio_connection().await?;
    tracing::info!("Intervention guard: Redis");
    Ok(Arc::new(RedisInterventionGuard::new(
        conn,
        config.redis.key_prefix.clone(),
    )))
}

fn telephony_provider(config: &AppConfig) -> Result<Arc<dyn TelephonyProvider>, Box<dyn Error>> {
    if !config.telephony.is_configured() {
        tracing::warn!("No telephony provider configured; calls are recorded, not placed");
        return Ok(Arc::new(MockTelephonyProvider::new()));
    }

    let adapter = TwilioTelephonyAdapter::new(TwilioConfig::from(&config.telephony))?;
    tracing::info!("Telephony provider: Twilio");
    Ok(Arc::new(adapter))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
