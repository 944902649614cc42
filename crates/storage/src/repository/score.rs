use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use sqlx::{FromRow, PgPool};

use crate::dto::common::{PageWindow, clamp_top_limit};
use crate::error::{Result, StorageError};
use crate::models::{Rating, ScoreRecord};
use crate::store::{Contribution, ListOrder};

#[derive(FromRow)]
struct ScoreRow {
    roll_no: String,
    points: Decimal,
    raters: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ScoreRow> for ScoreRecord {
    fn from(row: ScoreRow) -> Self {
        Self {
            roll_no: row.roll_no,
            points: decimal_to_f64(row.points),
            raters: row.raters,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct RatingRow {
    rater: String,
    points: Decimal,
    rated_at: DateTime<Utc>,
}

pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a score record by roll number
    pub async fn find_by_roll_no(&self, roll_no: &str) -> Result<ScoreRecord> {
        let row: ScoreRow = sqlx::query_as(
            r#"
            SELECT roll_no, points, raters, created_at, updated_at
            FROM scores
            WHERE roll_no = $1
            "#,
        )
        .bind(roll_no)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    /// Upsert-and-increment in one statement. The conflict branch only fires
    /// when the rater is not yet recorded, so a repeated rater yields no row.
    pub async fn add_points(&self, contribution: &Contribution) -> Result<ScoreRecord> {
        let delta = Decimal::from_f64(contribution.points)
            .ok_or(StorageError::InvalidAmount(contribution.points))?;
        let rater = contribution.rater.as_deref();

        let mut tx = self.pool.begin().await?;

        let row: Option<ScoreRow> = sqlx::query_as(
            r#"
            INSERT INTO scores (roll_no, points, raters)
            VALUES (
                $1,
                $2,
                CASE WHEN $3::text IS NULL THEN '{}'::text[] ELSE ARRAY[$3::text] END
            )
            ON CONFLICT (roll_no) DO UPDATE
            SET points = scores.points + EXCLUDED.points,
                raters = CASE
                    WHEN $3::text IS NULL THEN scores.raters
                    ELSE array_append(scores.raters, $3::text)
                END,
                updated_at = NOW()
            WHERE $3::text IS NULL OR NOT ($3::text = ANY(scores.raters))
            RETURNING roll_no, points, raters, created_at, updated_at
            "#,
        )
        .bind(&contribution.roll_no)
        .bind(delta)
        .bind(rater)
        .fetch_optional(&mut *tx)
        .await?;

        let duplicate = || StorageError::DuplicateRating {
            roll_no: contribution.roll_no.clone(),
            rater: rater.unwrap_or_default().to_string(),
        };

        let row = row.ok_or_else(duplicate)?;

        if let Some(rater) = rater {
            let inserted = sqlx::query(
                r#"
                INSERT INTO score_ratings (roll_no, rater, points)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(&contribution.roll_no)
            .bind(rater)
            .bind(delta)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from);

            match inserted {
                Err(e) if e.is_unique_violation() => return Err(duplicate()),
                Err(e) => return Err(e),
                Ok(_) => {}
            }
        }

        tx.commit().await?;

        tracing::debug!(
            roll_no = %row.roll_no,
            delta = contribution.points,
            "Points added"
        );

        Ok(row.into())
    }

    /// List every record in the requested order
    pub async fn list_all(&self, order: ListOrder) -> Result<Vec<ScoreRecord>> {
        let query = match order {
            ListOrder::PointsDesc => {
                r#"
                SELECT roll_no, points, raters, created_at, updated_at
                FROM scores
                ORDER BY points DESC, seq ASC
                "#
            }
            ListOrder::Insertion => {
                r#"
                SELECT roll_no, points, raters, created_at, updated_at
                FROM scores
                ORDER BY seq ASC
                "#
            }
        };

        let rows: Vec<ScoreRow> = sqlx::query_as(query).fetch_all(self.pool).await?;

        Ok(rows.into_iter().map(ScoreRecord::from).collect())
    }

    /// Highest-scoring records
    pub async fn list_top(&self, limit: u32) -> Result<Vec<ScoreRecord>> {
        let limit = clamp_top_limit(limit as i64) as i64;
        self.fetch_ranked(limit, 0).await
    }

    /// A page of the ranked listing
    pub async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<ScoreRecord>> {
        let window = PageWindow::new(page as i64, limit as i64);
        self.fetch_ranked(window.limit() as i64, window.offset() as i64)
            .await
    }

    async fn fetch_ranked(&self, limit: i64, offset: i64) -> Result<Vec<ScoreRecord>> {
        let rows: Vec<ScoreRow> = sqlx::query_as(
            r#"
            SELECT roll_no, points, raters, created_at, updated_at
            FROM scores
            ORDER BY points DESC, seq ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ScoreRecord::from).collect())
    }

    /// Insert zero-point records for roll numbers not yet present
    pub async fn bulk_ensure(&self, roll_nos: &[String]) -> Result<u64> {
        if roll_nos.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO scores (roll_no)
            SELECT roll_no
            FROM UNNEST($1::text[]) WITH ORDINALITY AS t(roll_no, ord)
            ORDER BY ord
            ON CONFLICT (roll_no) DO NOTHING
            "#,
        )
        .bind(roll_nos)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Audit log of rater-attributed contributions
    pub async fn ratings(&self, roll_no: &str) -> Result<Vec<Rating>> {
        self.find_by_roll_no(roll_no).await?;

        let rows: Vec<RatingRow> = sqlx::query_as(
            r#"
            SELECT rater, points, rated_at
            FROM score_ratings
            WHERE roll_no = $1
            ORDER BY rating_id
            "#,
        )
        .bind(roll_no)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Rating {
                rater: row.rater,
                points: decimal_to_f64(row.points),
                rated_at: row.rated_at,
            })
            .collect())
    }
}

fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_f64().unwrap_or(0.0)
}

// These run against a real PostgreSQL server: set DATABASE_URL and use
// `cargo test -p storage -- --ignored`. Each test gets a fresh database.
#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore] // Only run when PostgreSQL is reachable through DATABASE_URL
    async fn test_add_points_upserts_and_accumulates(pool: PgPool) {
        let repo = ScoreRepository::new(&pool);

        assert!(matches!(
            repo.find_by_roll_no("R1").await,
            Err(StorageError::NotFound)
        ));

        let first = repo.add_points(&Contribution::anonymous("R1", 7.0)).await.unwrap();
        assert_eq!(first.points, 7.0);

        let second = repo.add_points(&Contribution::anonymous("R1", 3.0)).await.unwrap();
        assert_eq!(second.points, 10.0);
        assert!(second.raters.is_empty());
        assert!(repo.ratings("R1").await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore] // Only run when PostgreSQL is reachable through DATABASE_URL
    async fn test_repeated_rater_is_rejected_without_changing_total(pool: PgPool) {
        let repo = ScoreRepository::new(&pool);

        repo.add_points(&Contribution::by("R1", 8.0, "alice")).await.unwrap();
        let err = repo
            .add_points(&Contribution::by("R1", 5.0, "alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateRating { .. }));

        let record = repo.add_points(&Contribution::by("R1", 4.0, "bob")).await.unwrap();
        assert_eq!(record.points, 12.0);
        assert_eq!(record.raters, vec!["alice".to_string(), "bob".to_string()]);

        let ratings = repo.ratings("R1").await.unwrap();
        let raters: Vec<&str> = ratings.iter().map(|r| r.rater.as_str()).collect();
        assert_eq!(raters, vec!["alice", "bob"]);
        assert_eq!(ratings[0].points, 8.0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore] // Only run when PostgreSQL is reachable through DATABASE_URL
    async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
        ScoreRepository::new(&pool)
            .add_points(&Contribution::anonymous("R1", 5.0))
            .await
            .unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    ScoreRepository::new(&pool)
                        .add_points(&Contribution::anonymous("R1", 2.0))
                        .await
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let record = ScoreRepository::new(&pool).find_by_roll_no("R1").await.unwrap();
        assert_eq!(record.points, 45.0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore] // Only run when PostgreSQL is reachable through DATABASE_URL
    async fn test_bulk_ensure_counts_only_new_records(pool: PgPool) {
        let repo = ScoreRepository::new(&pool);
        repo.add_points(&Contribution::anonymous("R1", 6.0)).await.unwrap();

        let roll_nos = vec!["R1".to_string(), "R2".to_string(), "R3".to_string()];
        assert_eq!(repo.bulk_ensure(&roll_nos).await.unwrap(), 2);
        assert_eq!(repo.bulk_ensure(&roll_nos).await.unwrap(), 0);
        assert_eq!(repo.bulk_ensure(&[]).await.unwrap(), 0);

        assert_eq!(repo.find_by_roll_no("R1").await.unwrap().points, 6.0);
        assert_eq!(repo.find_by_roll_no("R3").await.unwrap().points, 0.0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore] // Only run when PostgreSQL is reachable through DATABASE_URL
    async fn test_ranked_listings_break_ties_by_insertion(pool: PgPool) {
        let repo = ScoreRepository::new(&pool);
        for (roll_no, points) in [("A", 5.0), ("B", 9.0), ("C", 5.0), ("D", 1.0)] {
            repo.add_points(&Contribution::anonymous(roll_no, points))
                .await
                .unwrap();
        }

        let order = |records: Vec<ScoreRecord>| -> Vec<String> {
            records.into_iter().map(|r| r.roll_no).collect()
        };

        assert_eq!(
            order(repo.list_all(ListOrder::PointsDesc).await.unwrap()),
            vec!["B", "A", "C", "D"]
        );
        assert_eq!(
            order(repo.list_all(ListOrder::Insertion).await.unwrap()),
            vec!["A", "B", "C", "D"]
        );
        assert_eq!(order(repo.list_top(2).await.unwrap()), vec!["B", "A"]);
        assert_eq!(order(repo.list_page(2, 2).await.unwrap()), vec!["C", "D"]);
    }
}
