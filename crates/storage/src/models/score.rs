use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Accumulated points for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub roll_no: String,
    pub points: f64,
    /// Reviewers who have already contributed to this record.
    pub raters: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new(roll_no: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            roll_no: roll_no.into(),
            points: 0.0,
            raters: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_rater(&self, rater: &str) -> bool {
        self.raters.iter().any(|r| r == rater)
    }
}

/// One rater-attributed contribution, kept as an audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub rater: String,
    pub points: f64,
    pub rated_at: DateTime<Utc>,
}
