use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use feedtrack_core::progress::{ProgressService, ProgressServiceTrait};
use feedtrack_core::store::{InMemoryStore, RestStoreClient};
use feedtrack_core::targets::{TargetRepositoryTrait, TargetService, TargetServiceTrait};
use feedtrack_core::transactions::TransactionRepositoryTrait;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;

pub struct AppState {
    pub progress_service: Arc<dyn ProgressServiceTrait>,
    pub target_service: Arc<dyn TargetServiceTrait>,
}

impl AppState {
    /// Wire both services to one store that serves targets and orders.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: TargetRepositoryTrait + TransactionRepositoryTrait + 'static,
    {
        AppState {
            progress_service: Arc::new(ProgressService::new(store.clone(), store.clone())),
            target_service: Arc::new(TargetService::new(store)),
        }
    }
}

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,feedtrack_core=info,tower_http=info")
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let state = match &config.store {
        Some(store_config) => {
            tracing::info!("Using store at {}", store_config.base_url);
            AppState::with_store(Arc::new(RestStoreClient::new(store_config.clone())?))
        }
        None => {
            tracing::warn!("FEEDTRACK_STORE_URL not set, using in-memory store");
            AppState::with_store(Arc::new(InMemoryStore::new()))
        }
    };
    Ok(Arc::new(state))
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);
    Ok(match &config.cors_origin {
        Some(origin) => cors.allow_origin(origin.parse::<HeaderValue>()?),
        None => cors.allow_origin(Any),
    })
}

/// Router with the API mounted under `/api/v1`, without transport layers
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api/v1", api::router())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let state = build_state(&config)?;

    let app = app_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(&config)?);

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
