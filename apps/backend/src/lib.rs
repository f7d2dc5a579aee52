pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use recitation_core::{ensure_index, install_corpus, load_corpus_file, VerseIndex};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub index: &'static VerseIndex,
    pub config: Arc<Config>,
}

impl AppState {
    /// State backed by the process-wide verse index.
    pub fn new(config: Config) -> Self {
        Self {
            index: ensure_index(),
            config: Arc::new(config),
        }
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/normalize", post(routes::normalize::normalize))
        .route("/api/verses/match", post(routes::verses::find_matches))
        .route("/api/verses/:key", get(routes::verses::get))
        .route("/api/recitation/analyze", post(routes::recitation::analyze))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    match &config.corpus_path {
        Some(path) => {
            tracing::info!("Loading verse corpus from {}...", path.display());
            let corpus = load_corpus_file(path)?;
            install_corpus(corpus)?;
        }
        None => tracing::info!("No QURAN_CORPUS_PATH set, using bundled sample corpus"),
    }

    let addr = config.addr();
    let state = AppState::new(config);
    tracing::info!("Verse index ready with {} verses", state.index.len());

    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
