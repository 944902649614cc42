use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::CandidateProfile;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetailsParams {
    /// Reviewer name; when given every entry reports whether they already rated it
    pub rater: Option<String>,
}

impl DetailsParams {
    pub fn rater(&self) -> Option<&str> {
        self.rater.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }
}

/// A candidate profile merged with its stored points
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailedScoreEntry {
    pub roll_no: Option<String>,
    pub points: f64,
    pub name: Option<String>,
    pub branch: Option<String>,
    pub image_url: Option<String>,
    /// The full application record as read from the candidate directory
    #[schema(value_type = Object)]
    pub application: CandidateProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_rated: Option<bool>,
}
