use std::sync::Arc;

use axum::{routing::get, Router};

use crate::main_lib::AppState;

pub mod progress;
pub mod shared;
pub mod targets;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(progress::router())
        .merge(targets::router())
}
