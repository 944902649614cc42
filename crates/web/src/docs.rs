use utoipa::OpenApi;

use crate::features::{health, leaderboard, points, seed};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handlers::health,
        points::handlers::get_points,
        points::handlers::get_ratings,
        points::handlers::add_points,
        points::handlers::top_points,
        points::handlers::all_points,
        points::handlers::list_points,
        leaderboard::handlers::all_with_details,
        seed::handlers::seed_from_applications,
    ),
    components(
        schemas(
            storage::dto::common::HealthResponse,
            storage::dto::score::AddPointsRequest,
            storage::dto::score::ScoreSummary,
            storage::dto::score::RatingResponse,
            storage::dto::score::SeedResponse,
            storage::dto::leaderboard::DetailedScoreEntry,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "points", description = "Per-candidate point totals"),
        (name = "leaderboard", description = "Totals merged with candidate profiles"),
        (name = "seed", description = "Score record initialisation"),
    )
)]
pub struct ApiDoc;
