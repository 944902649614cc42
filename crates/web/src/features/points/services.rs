use storage::{
    dto::{
        common::{PageWindow, TopParams},
        score::{AddPointsRequest, RatingResponse, ScoreSummary},
    },
    error::Result,
    store::{ListOrder, ScoreStore},
};

/// Get the total for one candidate
pub async fn get_points(store: &dyn ScoreStore, roll_no: &str) -> Result<ScoreSummary> {
    store.get(roll_no).await.map(ScoreSummary::from)
}

/// Add a contribution and return the new total
pub async fn add_points(store: &dyn ScoreStore, request: AddPointsRequest) -> Result<ScoreSummary> {
    let contribution = request.into_contribution();
    let record = store.add_points(&contribution).await?;

    tracing::info!(
        roll_no = %record.roll_no,
        delta = contribution.points,
        total = record.points,
        rater = contribution.rater.as_deref().unwrap_or("-"),
        "Points added"
    );

    Ok(record.into())
}

/// Leaderboard head
pub async fn top_points(store: &dyn ScoreStore, params: &TopParams) -> Result<Vec<ScoreSummary>> {
    let records = store.list_top(params.limit()).await?;
    Ok(records.into_iter().map(ScoreSummary::from).collect())
}

/// Full leaderboard, highest first
pub async fn all_points(store: &dyn ScoreStore) -> Result<Vec<ScoreSummary>> {
    let records = store.list_all(ListOrder::PointsDesc).await?;
    Ok(records.into_iter().map(ScoreSummary::from).collect())
}

/// One page of the leaderboard
pub async fn page_points(store: &dyn ScoreStore, window: PageWindow) -> Result<Vec<ScoreSummary>> {
    let records = store.list_page(window.page, window.limit).await?;
    Ok(records.into_iter().map(ScoreSummary::from).collect())
}

/// Audit log for one candidate
pub async fn ratings(store: &dyn ScoreStore, roll_no: &str) -> Result<Vec<RatingResponse>> {
    let ratings = store.ratings(roll_no).await?;
    Ok(ratings.into_iter().map(RatingResponse::from).collect())
}
