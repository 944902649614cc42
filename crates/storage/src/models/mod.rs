mod candidate;
mod score;

pub use candidate::CandidateProfile;
pub use score::{Rating, ScoreRecord};
