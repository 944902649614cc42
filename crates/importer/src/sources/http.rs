use storage::models::CandidateProfile;

use crate::error::Result;
use crate::traits::CandidateSource;

/// A JSON array of applications served over HTTP.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl CandidateSource for HttpSource {
    async fn load(&self) -> Result<Vec<CandidateProfile>> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let profiles = response.json::<Vec<CandidateProfile>>().await?;
        tracing::debug!("Fetched {} candidates from {}", profiles.len(), self.url);

        Ok(profiles)
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}
