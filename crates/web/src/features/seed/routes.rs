use axum::{Router, routing::post};

use super::handlers::seed_from_applications;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/from-applications", post(seed_from_applications))
}
