use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use feedtrack_core::progress::{TeamProgress, YearProgress};
use serde::Deserialize;

use crate::api::shared::{parse_subject_list, resolve_year, today, YearQuery};
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

#[derive(Deserialize)]
struct TeamProgressQuery {
    year: Option<i32>,
    /// Comma separated subject ids
    subjects: Option<String>,
}

/// Target against achievement for one subject
/// Query params:
///   year: YYYY (optional, defaults to the current year)
async fn get_subject_progress(
    Path(subject_id): Path<String>,
    Query(query): Query<YearQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<YearProgress>> {
    let year = resolve_year(query.year)?;
    let progress = state
        .progress_service
        .compute_year_progress(&subject_id, year, today())
        .await?;
    Ok(Json(progress))
}

/// Combined progress for several subjects
/// Query params:
///   year: YYYY (optional)
///   subjects: comma separated subject ids (required)
async fn get_team_progress(
    Query(query): Query<TeamProgressQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TeamProgress>> {
    let year = resolve_year(query.year)?;
    let subjects = query
        .subjects
        .as_deref()
        .map(parse_subject_list)
        .unwrap_or_default();
    if subjects.is_empty() {
        return Err(ApiError::BadRequest(
            "Query parameter 'subjects' must list at least one subject id".to_string(),
        ));
    }

    let progress = state
        .progress_service
        .compute_team_progress(&subjects, year, today())
        .await?;
    Ok(Json(progress))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/subjects/:subject_id/progress", get(get_subject_progress))
        .route("/team/progress", get(get_team_progress))
}
