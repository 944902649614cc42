use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::score::SeedResponse;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/seed/from-applications",
    responses(
        (status = 200, description = "Records created for candidates that had none", body = SeedResponse),
        (status = 500, description = "Candidate directory or store unavailable")
    ),
    tag = "seed"
)]
pub async fn seed_from_applications(State(state): State<AppState>) -> Result<Response, WebError> {
    let response =
        services::seed_from_applications(state.store.as_ref(), state.directory.as_ref()).await?;

    Ok(Json(response).into_response())
}
