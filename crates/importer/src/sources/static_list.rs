use storage::models::CandidateProfile;

use crate::error::Result;
use crate::traits::CandidateSource;

/// A fixed, in-memory candidate list.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    profiles: Vec<CandidateProfile>,
}

impl StaticSource {
    pub fn new(profiles: Vec<CandidateProfile>) -> Self {
        Self { profiles }
    }
}

#[async_trait::async_trait]
impl CandidateSource for StaticSource {
    async fn load(&self) -> Result<Vec<CandidateProfile>> {
        Ok(self.profiles.clone())
    }

    fn describe(&self) -> String {
        format!("static list of {} candidates", self.profiles.len())
    }
}
