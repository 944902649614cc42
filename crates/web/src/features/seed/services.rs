use importer::CandidateSource;
use storage::{dto::score::SeedResponse, store::ScoreStore};

use crate::error::WebResult;

/// Create zero-point records for every candidate in the directory
pub async fn seed_from_applications(
    store: &dyn ScoreStore,
    directory: &dyn CandidateSource,
) -> WebResult<SeedResponse> {
    let report = importer::seed(store, directory).await?;

    Ok(SeedResponse {
        created: report.created,
    })
}
