use std::collections::HashSet;

use storage::models::CandidateProfile;
use storage::store::ScoreStore;

use crate::Result;
use crate::traits::CandidateSource;

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Candidates read from the directory
    pub total: usize,
    /// Candidates without a roll number, or repeating one
    pub skipped: usize,
    /// Records that did not exist before
    pub created: u64,
}

/// Distinct, non-blank roll numbers in directory order.
pub fn collect_roll_nos(profiles: &[CandidateProfile]) -> Vec<String> {
    let mut seen = HashSet::new();
    profiles
        .iter()
        .filter_map(CandidateProfile::roll_no)
        .filter(|r| seen.insert(*r))
        .map(String::from)
        .collect()
}

/// Make sure every candidate in `source` has a score record.
pub async fn seed(store: &dyn ScoreStore, source: &dyn CandidateSource) -> Result<SeedReport> {
    let profiles = source.load().await?;
    let roll_nos = collect_roll_nos(&profiles);

    let created = store.bulk_ensure(&roll_nos).await?;

    let report = SeedReport {
        total: profiles.len(),
        skipped: profiles.len() - roll_nos.len(),
        created,
    };

    tracing::info!(
        source = %source.describe(),
        total = report.total,
        skipped = report.skipped,
        created = report.created,
        "Seeded score records"
    );

    Ok(report)
}
