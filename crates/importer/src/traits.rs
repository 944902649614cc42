use storage::models::CandidateProfile;

use crate::Result;

/// Somewhere the candidate directory can be read from.
#[async_trait::async_trait]
pub trait CandidateSource: Send + Sync {
    async fn load(&self) -> Result<Vec<CandidateProfile>>;

    /// Human readable location, used in logs.
    fn describe(&self) -> String;
}
