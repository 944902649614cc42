use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{add_points, all_points, get_points, get_ratings, list_points, top_points};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_points))
        .route("/add", post(add_points))
        .route("/top", get(top_points))
        .route("/all", get(all_points))
        .route("/roll/:roll_no", get(get_points))
        .route("/roll/:roll_no/ratings", get(get_ratings))
}

/// The front end posts scores under `/api/scores`.
pub fn score_routes() -> Router<AppState> {
    Router::new().route("/add", post(add_points))
}
