use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Rating, ScoreRecord};
use crate::store::Contribution;

/// Request payload for adding points to a candidate
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPointsRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub roll_no: String,

    pub points: f64,

    pub rater: Option<String>,
}

impl AddPointsRequest {
    /// Convert into a store contribution. The roll number is kept verbatim so
    /// it can be looked up exactly as submitted; a blank rater counts as anonymous.
    pub fn into_contribution(self) -> Contribution {
        let rater = self
            .rater
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Contribution {
            roll_no: self.roll_no,
            points: self.points,
            rater,
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut error = validator::ValidationError::new("blank");
        error.message = Some("rollNo must not be empty".into());
        return Err(error);
    }
    Ok(())
}

/// `{rollNo, points}` view of a score record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub roll_no: String,
    pub points: f64,
}

impl From<ScoreRecord> for ScoreSummary {
    fn from(record: ScoreRecord) -> Self {
        Self {
            roll_no: record.roll_no,
            points: record.points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub rater: String,
    pub points: f64,
    pub rated_at: DateTime<Utc>,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            rater: rating.rater,
            points: rating.points,
            rated_at: rating.rated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeedResponse {
    pub created: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> AddPointsRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let req = parse(json!({"rollNo": "R1", "points": 7}));
        assert!(req.validate().is_ok());
        assert_eq!(req.points, 7.0);
    }

    #[test]
    fn test_blank_roll_no_is_rejected() {
        let req = parse(json!({"rollNo": "   ", "points": 7}));
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("roll_no"));
    }

    #[test]
    fn test_non_numeric_points_do_not_deserialize() {
        let result: Result<AddPointsRequest, _> =
            serde_json::from_value(json!({"rollNo": "R1", "points": "7"}));
        assert!(result.is_err());

        let result: Result<AddPointsRequest, _> = serde_json::from_value(json!({"points": 7}));
        assert!(result.is_err());
    }

    #[test]
    fn test_contribution_keeps_roll_no_and_normalizes_rater() {
        let contribution = parse(json!({"rollNo": " R1 ", "points": 4, "rater": "  "}))
            .into_contribution();
        assert_eq!(contribution.roll_no, " R1 ");
        assert_eq!(contribution.rater, None);

        let contribution = parse(json!({"rollNo": "R1", "points": 4, "rater": " alice "}))
            .into_contribution();
        assert_eq!(contribution.rater.as_deref(), Some("alice"));
    }

    #[test]
    fn test_long_ids_and_large_amounts_are_accepted() {
        let req = parse(json!({
            "rollNo": "R".repeat(300),
            "points": 2e12,
            "rater": "a".repeat(500),
        }));
        assert!(req.validate().is_ok());

        let contribution = req.into_contribution();
        assert_eq!(contribution.roll_no.len(), 300);
        assert_eq!(contribution.points, 2e12);

        let req = parse(json!({"rollNo": "R1", "points": -5e10}));
        assert!(req.validate().is_ok());
    }
}
