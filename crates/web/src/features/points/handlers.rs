use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use storage::dto::{
    common::{PaginationParams, TopParams},
    score::{AddPointsRequest, RatingResponse, ScoreSummary},
};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/points/roll/{rollNo}",
    params(
        ("rollNo" = String, Path, description = "Candidate roll number")
    ),
    responses(
        (status = 200, description = "Current total", body = ScoreSummary),
        (status = 404, description = "No score recorded for this roll number")
    ),
    tag = "points"
)]
pub async fn get_points(
    State(state): State<AppState>,
    Path(roll_no): Path<String>,
) -> Result<Response, WebError> {
    let summary = services::get_points(state.store.as_ref(), &roll_no).await?;

    Ok(Json(summary).into_response())
}

#[utoipa::path(
    get,
    path = "/api/points/roll/{rollNo}/ratings",
    params(
        ("rollNo" = String, Path, description = "Candidate roll number")
    ),
    responses(
        (status = 200, description = "Rater-attributed contributions, oldest first", body = Vec<RatingResponse>),
        (status = 404, description = "No score recorded for this roll number")
    ),
    tag = "points"
)]
pub async fn get_ratings(
    State(state): State<AppState>,
    Path(roll_no): Path<String>,
) -> Result<Response, WebError> {
    let ratings = services::ratings(state.store.as_ref(), &roll_no).await?;

    Ok(Json(ratings).into_response())
}

#[utoipa::path(
    post,
    path = "/api/points/add",
    request_body = AddPointsRequest,
    responses(
        (status = 200, description = "Points added, new total returned", body = ScoreSummary),
        (status = 400, description = "rollNo missing or points not numeric"),
        (status = 409, description = "This rater already scored the candidate")
    ),
    tag = "points"
)]
pub async fn add_points(
    State(state): State<AppState>,
    payload: Result<Json<AddPointsRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!("Rejected add-points body: {}", rejection.body_text());
        WebError::BadRequest("rollNo and numeric points required".to_string())
    })?;

    req.validate()?;

    let summary = services::add_points(state.store.as_ref(), req).await?;

    Ok(Json(summary).into_response())
}

#[utoipa::path(
    get,
    path = "/api/points/top",
    params(TopParams),
    responses(
        (status = 200, description = "Highest totals first", body = Vec<ScoreSummary>)
    ),
    tag = "points"
)]
pub async fn top_points(
    State(state): State<AppState>,
    Query(params): Query<TopParams>,
) -> Result<Response, WebError> {
    let entries = services::top_points(state.store.as_ref(), &params).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/points/all",
    responses(
        (status = 200, description = "Every total, highest first", body = Vec<ScoreSummary>)
    ),
    tag = "points"
)]
pub async fn all_points(State(state): State<AppState>) -> Result<Response, WebError> {
    let entries = services::all_points(state.store.as_ref()).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/points",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of the ranked totals", body = Vec<ScoreSummary>)
    ),
    tag = "points"
)]
pub async fn list_points(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    let entries = services::page_points(state.store.as_ref(), params.window()).await?;

    Ok(Json(entries).into_response())
}
