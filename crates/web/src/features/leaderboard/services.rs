use std::collections::HashMap;

use importer::CandidateSource;
use storage::{
    dto::leaderboard::DetailedScoreEntry,
    models::{CandidateProfile, ScoreRecord},
    store::{ListOrder, ScoreStore},
};

use crate::error::WebResult;

/// Merge stored totals into the candidate directory and rank the result.
///
/// Candidates without a record get 0 points. Equal totals keep directory
/// order. When `rater` is given each entry says whether that reviewer has
/// already scored the candidate.
pub fn merge_and_rank(
    profiles: Vec<CandidateProfile>,
    records: &[ScoreRecord],
    rater: Option<&str>,
) -> Vec<DetailedScoreEntry> {
    let by_roll_no: HashMap<&str, &ScoreRecord> = records
        .iter()
        .map(|record| (record.roll_no.as_str(), record))
        .collect();

    let mut entries: Vec<DetailedScoreEntry> = profiles
        .into_iter()
        .map(|profile| {
            let record = profile
                .roll_no()
                .and_then(|roll_no| by_roll_no.get(roll_no).copied());

            DetailedScoreEntry {
                roll_no: profile.roll_no().map(String::from),
                points: record.map_or(0.0, |r| r.points),
                name: profile.name.clone(),
                branch: profile.branch.clone(),
                image_url: profile.image_url.clone(),
                already_rated: rater.map(|rater| record.is_some_and(|r| r.has_rater(rater))),
                application: profile,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.points.total_cmp(&a.points));
    entries
}

pub async fn all_with_details(
    store: &dyn ScoreStore,
    directory: &dyn CandidateSource,
    rater: Option<&str>,
) -> WebResult<Vec<DetailedScoreEntry>> {
    let profiles = directory.load().await?;
    let records = store.list_all(ListOrder::Insertion).await?;

    Ok(merge_and_rank(profiles, &records, rater))
}
