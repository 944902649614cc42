pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use error::Result;
use models::{Rating, ScoreRecord};
use repository::score::ScoreRepository;
use store::{Contribution, ListOrder, MemoryScoreStore, ScoreStore};

/// Database URL prefix that selects the in-memory store.
pub const MEMORY_URL_PREFIX: &str = "memory:";

/// PostgreSQL-backed score store.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ScoreStore for Database {
    async fn get(&self, roll_no: &str) -> Result<ScoreRecord> {
        ScoreRepository::new(&self.pool).find_by_roll_no(roll_no).await
    }

    async fn add_points(&self, contribution: &Contribution) -> Result<ScoreRecord> {
        ScoreRepository::new(&self.pool).add_points(contribution).await
    }

    async fn list_all(&self, order: ListOrder) -> Result<Vec<ScoreRecord>> {
        ScoreRepository::new(&self.pool).list_all(order).await
    }

    async fn list_top(&self, limit: u32) -> Result<Vec<ScoreRecord>> {
        ScoreRepository::new(&self.pool).list_top(limit).await
    }

    async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<ScoreRecord>> {
        ScoreRepository::new(&self.pool).list_page(page, limit).await
    }

    async fn bulk_ensure(&self, roll_nos: &[String]) -> Result<u64> {
        ScoreRepository::new(&self.pool).bulk_ensure(roll_nos).await
    }

    async fn ratings(&self, roll_no: &str) -> Result<Vec<Rating>> {
        ScoreRepository::new(&self.pool).ratings(roll_no).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Open the score store named by `database_url`.
///
/// A `memory:` URL gives a fresh in-memory store; anything else is treated as
/// a PostgreSQL connection string, connected and migrated before returning.
pub async fn open_store(database_url: &str, max_connections: u32) -> Result<Arc<dyn ScoreStore>> {
    if database_url.starts_with(MEMORY_URL_PREFIX) {
        tracing::warn!("Using in-memory score store, data will not survive a restart");
        return Ok(Arc::new(MemoryScoreStore::new()));
    }

    let db = Database::new(database_url, max_connections).await?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations().await?;
    tracing::info!("Database migrations completed successfully");

    Ok(Arc::new(db))
}

/// Strip credentials from a connection string before it is logged.
pub fn redact_database_url(database_url: &str) -> &str {
    database_url
        .rsplit_once('@')
        .map(|(_, host)| host)
        .unwrap_or(database_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_database_url() {
        assert_eq!(
            redact_database_url("postgres://user:secret@db:5432/flux"),
            "db:5432/flux"
        );
        assert_eq!(redact_database_url("memory:"), "memory:");
    }

    #[tokio::test]
    async fn test_memory_url_opens_memory_store() {
        let store = open_store("memory:", 1).await.unwrap();
        store
            .add_points(&Contribution::anonymous("R1", 2.0))
            .await
            .unwrap();
        assert_eq!(store.get("R1").await.unwrap().points, 2.0);
        store.close().await;
    }
}
