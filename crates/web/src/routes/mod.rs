use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::features::{health, leaderboard, points, seed};
use crate::state::AppState;


pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::very_permissive().max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .merge(health::routes::routes())
        .nest(
            "/api/points",
            points::routes::routes().merge(leaderboard::routes::routes()),
        )
        .nest(
            "/api/scores",
            points::routes::score_routes().merge(leaderboard::routes::routes()),
        )
        .nest("/api/seed", seed::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
