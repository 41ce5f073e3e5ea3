//! FeedMe bot — HTTP session host.
//!
//! Serves the session API, classifying messages through LUIS and keeping
//! one order per session in memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use fm_bot::classifier::LuisClassifier;
use fm_bot::config::BotConfig;
use fm_bot::routes::build_router;
use fm_bot::session;
use fm_bot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "fm-bot starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "feedme.toml".to_string());
    let config = BotConfig::load(&config_path)?;
    tracing::info!(
        luis_host = %config.luis.hostname,
        staging = config.luis.staging,
        "config loaded"
    );

    // ── Classifier + shared state ───────────────────────────────
    let classifier = LuisClassifier::new(config.luis.clone())?;
    let state = AppState::with_classifier(Arc::new(classifier));

    // ── Idle session sweep ──────────────────────────────────────
    let max_idle = Duration::from_secs(config.session_idle_secs);
    tokio::spawn(session::run_eviction(
        state.sessions.clone(),
        Duration::from_secs(60),
        max_idle,
    ));

    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("fm-bot stopped");
    Ok(())
}
