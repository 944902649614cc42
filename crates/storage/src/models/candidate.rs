use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A candidate application as exported by the recruitment form.
///
/// Only the fields the leaderboard needs are typed; everything else the
/// export carries (contact details, skills, free text) is kept verbatim in
/// `extra` so it can be handed back to the front end untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CandidateProfile {
    /// Roll number with surrounding whitespace removed, `None` when blank.
    pub fn roll_no(&self) -> Option<&str> {
        self.roll_no
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_are_preserved() {
        let raw = json!({
            "rollNo": "2023CS101",
            "name": "Asha",
            "branch": "CSE",
            "imageUrl": "https://img.example/asha.png",
            "year": "2",
            "softSkills": ["speaking"]
        });

        let profile: CandidateProfile = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(profile.roll_no(), Some("2023CS101"));
        assert_eq!(profile.extra.get("year"), Some(&json!("2")));

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_blank_roll_no_is_treated_as_missing() {
        let profile: CandidateProfile = serde_json::from_value(json!({"rollNo": "  "})).unwrap();
        assert_eq!(profile.roll_no(), None);

        let profile: CandidateProfile = serde_json::from_value(json!({"name": "X"})).unwrap();
        assert_eq!(profile.roll_no(), None);
    }
}
