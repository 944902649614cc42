//! The score store abstraction.
//!
//! Every backend must apply `add_points` atomically: concurrent increments
//! for the same roll number never lose updates, and the rater check happens
//! in the same step as the increment.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Rating, ScoreRecord};

mod memory;

pub use memory::MemoryScoreStore;

/// A single point submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub roll_no: String,
    pub points: f64,
    pub rater: Option<String>,
}

impl Contribution {
    pub fn anonymous(roll_no: impl Into<String>, points: f64) -> Self {
        Self {
            roll_no: roll_no.into(),
            points,
            rater: None,
        }
    }

    pub fn by(roll_no: impl Into<String>, points: f64, rater: impl Into<String>) -> Self {
        Self {
            roll_no: roll_no.into(),
            points,
            rater: Some(rater.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Highest points first, ties in insertion order
    #[default]
    PointsDesc,
    Insertion,
}

#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn get(&self, roll_no: &str) -> Result<ScoreRecord>;

    /// Create the record if absent, then add `points` to it.
    ///
    /// Fails with `StorageError::DuplicateRating` when the rater has already
    /// contributed to this record; the total is left unchanged in that case.
    async fn add_points(&self, contribution: &Contribution) -> Result<ScoreRecord>;

    async fn list_all(&self, order: ListOrder) -> Result<Vec<ScoreRecord>>;

    /// Highest `limit` records, `limit` clamped to 1..=100.
    async fn list_top(&self, limit: u32) -> Result<Vec<ScoreRecord>>;

    /// One page of the ranked listing, `page` >= 1 and `limit` clamped to 1..=1000.
    async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<ScoreRecord>>;

    /// Insert a zero-point record for each roll number not yet present and
    /// return how many were created. Existing records are never touched.
    async fn bulk_ensure(&self, roll_nos: &[String]) -> Result<u64>;

    /// Rater-attributed contributions for a record, oldest first.
    async fn ratings(&self, roll_no: &str) -> Result<Vec<Rating>>;

    async fn close(&self) {}
}
