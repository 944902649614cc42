use std::collections::HashSet;

use storage::models::CandidateProfile;
use tracing::warn;

pub struct DirectoryValidator;

impl DirectoryValidator {
    /// Check a loaded directory before seeding.
    ///
    /// Every finding is a warning: seeding skips entries without a roll
    /// number and ignores repeats, so nothing here stops an import.
    pub fn validate(profiles: &[CandidateProfile]) -> ValidationReport {
        let mut report = ValidationReport::default();
        let mut seen = HashSet::new();

        for (position, profile) in profiles.iter().enumerate() {
            match profile.roll_no() {
                None => {
                    let who = profile.name.as_deref().unwrap_or("unnamed");
                    report.warnings.push(format!(
                        "Candidate #{} ({}) has no rollNo and will be skipped",
                        position + 1,
                        who
                    ));
                }
                Some(roll_no) => {
                    if !seen.insert(roll_no) {
                        report
                            .warnings
                            .push(format!("Duplicate rollNo {}", roll_no));
                    }
                }
            }
        }

        report.unique_roll_nos = seen.len();

        // a non-empty directory without a single roll number is most likely
        // the wrong file
        if !profiles.is_empty() && seen.is_empty() {
            report
                .warnings
                .push("No candidate carries a rollNo; nothing will be seeded".to_string());
        }

        report
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
    pub unique_roll_nos: usize,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
