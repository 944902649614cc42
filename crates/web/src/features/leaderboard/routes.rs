use axum::{Router, routing::get};

use super::handlers::all_with_details;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/all-with-details", get(all_with_details))
}
