use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::dto::leaderboard::{DetailedScoreEntry, DetailsParams};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/points/all-with-details",
    params(DetailsParams),
    responses(
        (status = 200, description = "Every candidate with their total, highest first", body = Vec<DetailedScoreEntry>)
    ),
    tag = "leaderboard"
)]
pub async fn all_with_details(
    State(state): State<AppState>,
    Query(params): Query<DetailsParams>,
) -> Result<Response, WebError> {
    let entries = services::all_with_details(
        state.store.as_ref(),
        state.directory.as_ref(),
        params.rater(),
    )
    .await?;

    Ok(Json(entries).into_response())
}
