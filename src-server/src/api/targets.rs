use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use feedtrack_core::targets::{NewTarget, Target, TargetUpdate};

use crate::api::shared::{resolve_year, YearQuery};
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn get_subject_targets(
    Path(subject_id): Path<String>,
    Query(query): Query<YearQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Target>>> {
    let year = resolve_year(query.year)?;
    let targets = state.target_service.get_targets(&subject_id, year).await?;
    Ok(Json(targets))
}

async fn create_target(
    State(state): State<Arc<AppState>>,
    Json(target): Json<NewTarget>,
) -> ApiResult<(StatusCode, Json<Target>)> {
    let created = state.target_service.create_target(target).await?;
    tracing::info!(
        "Assigned target {} for subject {} in {}",
        created.id,
        created.subject_id,
        created.month_key
    );
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_target(
    State(state): State<Arc<AppState>>,
    Json(target): Json<TargetUpdate>,
) -> ApiResult<Json<Target>> {
    let updated = state.target_service.update_target(target).await?;
    Ok(Json(updated))
}

async fn delete_target(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.target_service.delete_target(&id).await?;
    tracing::info!("Deleted target {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/subjects/:subject_id/targets", get(get_subject_targets))
        .route("/targets", post(create_target).put(update_target))
        .route("/targets/:id", delete(delete_target))
}
