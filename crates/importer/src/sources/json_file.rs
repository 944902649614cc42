use std::path::PathBuf;

use storage::models::CandidateProfile;

use crate::error::{ImporterError, Result};
use crate::traits::CandidateSource;

/// A JSON array of applications on disk. Read on every load so that a
/// refreshed export is picked up without restarting.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CandidateSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<CandidateProfile>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ImporterError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let profiles: Vec<CandidateProfile> = serde_json::from_str(&content)?;
        tracing::debug!("Loaded {} candidates from {}", profiles.len(), self.path.display());

        Ok(profiles)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
