use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Contribution, ListOrder, ScoreStore};
use crate::dto::common::{PageWindow, clamp_top_limit};
use crate::error::{Result, StorageError};
use crate::models::{Rating, ScoreRecord};

struct Entry {
    record: ScoreRecord,
    ratings: Vec<Rating>,
}

#[derive(Default)]
struct Inner {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Inner {
    fn find(&self, roll_no: &str) -> Option<&Entry> {
        self.index.get(roll_no).map(|&i| &self.entries[i])
    }

    fn ranked(&self) -> Vec<ScoreRecord> {
        let mut records: Vec<ScoreRecord> =
            self.entries.iter().map(|e| e.record.clone()).collect();
        // stable: equal totals stay in insertion order
        records.sort_by(|a, b| b.points.total_cmp(&a.points));
        records
    }
}

/// Process-local score store.
///
/// Selected with a `memory:` database URL; contents are lost on restart.
#[derive(Default)]
pub struct MemoryScoreStore {
    inner: RwLock<Inner>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn get(&self, roll_no: &str) -> Result<ScoreRecord> {
        let inner = self.inner.read().await;
        inner
            .find(roll_no)
            .map(|e| e.record.clone())
            .ok_or(StorageError::NotFound)
    }

    async fn add_points(&self, contribution: &Contribution) -> Result<ScoreRecord> {
        if !contribution.points.is_finite() {
            return Err(StorageError::InvalidAmount(contribution.points));
        }

        let mut inner = self.inner.write().await;

        let existing = inner.index.get(&contribution.roll_no).copied();
        let idx = match existing {
            Some(idx) => idx,
            None => {
                let idx = inner.entries.len();
                inner.entries.push(Entry {
                    record: ScoreRecord::new(contribution.roll_no.clone()),
                    ratings: Vec::new(),
                });
                inner.index.insert(contribution.roll_no.clone(), idx);
                idx
            }
        };

        let entry = &mut inner.entries[idx];
        let now = Utc::now();

        if let Some(rater) = &contribution.rater {
            if entry.record.has_rater(rater) {
                return Err(StorageError::DuplicateRating {
                    roll_no: contribution.roll_no.clone(),
                    rater: rater.clone(),
                });
            }
            entry.record.raters.push(rater.clone());
            entry.ratings.push(Rating {
                rater: rater.clone(),
                points: contribution.points,
                rated_at: now,
            });
        }

        entry.record.points += contribution.points;
        entry.record.updated_at = now;

        Ok(entry.record.clone())
    }

    async fn list_all(&self, order: ListOrder) -> Result<Vec<ScoreRecord>> {
        let inner = self.inner.read().await;
        Ok(match order {
            ListOrder::PointsDesc => inner.ranked(),
            ListOrder::Insertion => inner.entries.iter().map(|e| e.record.clone()).collect(),
        })
    }

    async fn list_top(&self, limit: u32) -> Result<Vec<ScoreRecord>> {
        let limit = clamp_top_limit(limit as i64) as usize;
        let inner = self.inner.read().await;
        Ok(inner.ranked().into_iter().take(limit).collect())
    }

    async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<ScoreRecord>> {
        let window = PageWindow::new(page as i64, limit as i64);
        let inner = self.inner.read().await;
        Ok(inner
            .ranked()
            .into_iter()
            .skip(window.offset() as usize)
            .take(window.limit() as usize)
            .collect())
    }

    async fn bulk_ensure(&self, roll_nos: &[String]) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let mut created = 0;

        for roll_no in roll_nos {
            if inner.index.contains_key(roll_no) {
                continue;
            }
            let idx = inner.entries.len();
            inner.entries.push(Entry {
                record: ScoreRecord::new(roll_no.clone()),
                ratings: Vec::new(),
            });
            inner.index.insert(roll_no.clone(), idx);
            created += 1;
        }

        Ok(created)
    }

    async fn ratings(&self, roll_no: &str) -> Result<Vec<Rating>> {
        let inner = self.inner.read().await;
        inner
            .find(roll_no)
            .map(|e| e.ratings.clone())
            .ok_or(StorageError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn points(records: &[ScoreRecord]) -> Vec<f64> {
        records.iter().map(|r| r.points).collect()
    }

    async fn store_with(totals: &[(&str, f64)]) -> MemoryScoreStore {
        let store = MemoryScoreStore::new();
        for (roll_no, total) in totals {
            store
                .add_points(&Contribution::anonymous(*roll_no, *total))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let store = MemoryScoreStore::new();
        assert!(matches!(store.get("R1").await, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_add_points_accumulates() {
        let store = MemoryScoreStore::new();

        let first = store.add_points(&Contribution::anonymous("R1", 7.0)).await.unwrap();
        assert_eq!(first.points, 7.0);

        let second = store.add_points(&Contribution::anonymous("R1", 3.0)).await.unwrap();
        assert_eq!(second.points, 10.0);

        assert_eq!(store.get("R1").await.unwrap().points, 10.0);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let store = Arc::new(store_with(&[("R1", 5.0)]).await);

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .add_points(&Contribution::anonymous("R1", 2.0))
                        .await
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("R1").await.unwrap().points, 105.0);
    }

    #[tokio::test]
    async fn test_same_rater_is_rejected_once_recorded() {
        let store = MemoryScoreStore::new();

        store.add_points(&Contribution::by("R1", 8.0, "alice")).await.unwrap();
        let err = store
            .add_points(&Contribution::by("R1", 8.0, "alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateRating { .. }));

        let record = store.add_points(&Contribution::by("R1", 4.0, "bob")).await.unwrap();
        assert_eq!(record.points, 12.0);
        assert_eq!(record.raters, vec!["alice".to_string(), "bob".to_string()]);

        let ratings = store.ratings("R1").await.unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].rater, "alice");
        assert_eq!(ratings[1].points, 4.0);
    }

    #[tokio::test]
    async fn test_rejected_rater_does_not_create_record_twice() {
        let store = MemoryScoreStore::new();
        store.add_points(&Contribution::by("R1", 1.0, "alice")).await.unwrap();
        let _ = store.add_points(&Contribution::by("R1", 1.0, "alice")).await;

        let all = store.list_all(ListOrder::Insertion).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].points, 1.0);
    }

    #[tokio::test]
    async fn test_ranked_listing_breaks_ties_by_insertion() {
        let store = store_with(&[("A", 5.0), ("B", 9.0), ("C", 5.0), ("D", 1.0)]).await;

        let all = store.list_all(ListOrder::PointsDesc).await.unwrap();
        let order: Vec<&str> = all.iter().map(|r| r.roll_no.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C", "D"]);

        let insertion = store.list_all(ListOrder::Insertion).await.unwrap();
        assert_eq!(insertion[0].roll_no, "A");
    }

    #[tokio::test]
    async fn test_list_top_clamps_limit() {
        let store = store_with(&[("A", 1.0), ("B", 2.0), ("C", 3.0), ("D", 4.0)]).await;

        assert_eq!(points(&store.list_top(3).await.unwrap()), vec![4.0, 3.0, 2.0]);
        assert_eq!(store.list_top(0).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_page_offsets() {
        let totals: Vec<(String, f64)> = (1..=25).map(|i| (format!("R{i}"), i as f64)).collect();
        let store = MemoryScoreStore::new();
        for (roll_no, total) in &totals {
            store
                .add_points(&Contribution::anonymous(roll_no.clone(), *total))
                .await
                .unwrap();
        }

        let page = store.list_page(2, 10).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].points, 15.0);
        assert_eq!(page[9].points, 6.0);

        let last = store.list_page(3, 10).await.unwrap();
        assert_eq!(last.len(), 5);

        assert!(store.list_page(4, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_ensure_is_insert_if_absent() {
        let store = store_with(&[("R1", 6.0)]).await;
        let roll_nos = vec!["R1".to_string(), "R2".to_string(), "R3".to_string()];

        assert_eq!(store.bulk_ensure(&roll_nos).await.unwrap(), 2);
        assert_eq!(store.bulk_ensure(&roll_nos).await.unwrap(), 0);

        assert_eq!(store.get("R1").await.unwrap().points, 6.0);
        assert_eq!(store.get("R3").await.unwrap().points, 0.0);
    }

    #[tokio::test]
    async fn test_ratings_of_unknown_record() {
        let store = MemoryScoreStore::new();
        assert!(matches!(store.ratings("nope").await, Err(StorageError::NotFound)));
    }
}
