//! Toggle coordinator: runs each like/unlike as one transaction covering
//! the relation mutation and the counter recompute.

use sqlx::SqlitePool;

use crate::counter;
use crate::error::{LikeError, LikeResult};
use crate::store;

/// Coordinates like toggles against the shared pool.
///
/// Writes go through a `sqlx::Transaction`, which rolls back on drop unless
/// explicitly committed, so no exit path can leave a relation change
/// committed without its matching counter write. Reads bypass transactions
/// entirely.
#[derive(Debug, Clone)]
pub struct LikeService {
    pool: SqlitePool,
}

impl LikeService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a like for the pair and return the recomputed article count.
    ///
    /// Idempotent: liking an already-liked article changes nothing and
    /// returns the same count.
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, article_id: &str, user_id: &str) -> LikeResult<i64> {
        let mut tx = self.pool.begin().await?;

        store::insert(&mut *tx, article_id, user_id).await?;
        let count = counter::recompute_and_store(&mut tx, article_id).await?;

        tx.commit().await?;
        Ok(count)
    }

    /// Remove the pair's like and return the recomputed article count.
    ///
    /// Unlike `add`, removing a like that does not exist is rejected with
    /// [`LikeError::NotFound`] rather than treated as a no-op; the
    /// transaction is dropped unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, article_id: &str, user_id: &str) -> LikeResult<i64> {
        let mut tx = self.pool.begin().await?;

        let affected = store::delete(&mut *tx, article_id, user_id).await?;
        if affected == 0 {
            return Err(LikeError::NotFound);
        }

        let count = counter::recompute_and_store(&mut tx, article_id).await?;

        tx.commit().await?;
        Ok(count)
    }

    /// Whether the pair is currently liked. Read-only, no transaction.
    pub async fn status(&self, article_id: &str, user_id: &str) -> LikeResult<bool> {
        Ok(store::exists(&self.pool, article_id, user_id).await?)
    }

    /// Current number of like relations for the article. Read-only, no
    /// transaction, and independent of the denormalized column.
    pub async fn count(&self, article_id: &str) -> LikeResult<i64> {
        Ok(store::count(&self.pool, article_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup() -> (SqlitePool, LikeService) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE articles (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                content TEXT NOT NULL,
                likes INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE likes (
                article_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (user_id, article_id)
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        let service = LikeService::new(pool.clone());
        (pool, service)
    }

    async fn create_article(pool: &SqlitePool, id: &str) {
        sqlx::query("INSERT INTO articles (id, user_id, content, likes) VALUES (?1, 'author', 'hello', 0)")
            .bind(id)
            .execute(pool)
            .await
            .unwrap();
    }

    async fn article_likes_column(pool: &SqlitePool, id: &str) -> i64 {
        sqlx::query_scalar("SELECT likes FROM articles WHERE id = ?1")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn add_is_idempotent() {
        let (pool, service) = setup().await;
        create_article(&pool, "a1").await;

        assert_eq!(service.add("a1", "u1").await.unwrap(), 1);
        assert_eq!(service.add("a1", "u1").await.unwrap(), 1);

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
        assert_eq!(article_likes_column(&pool, "a1").await, 1);
    }

    #[tokio::test]
    async fn add_then_remove_round_trips() {
        let (pool, service) = setup().await;
        create_article(&pool, "a1").await;

        assert_eq!(service.add("a1", "u1").await.unwrap(), 1);
        assert_eq!(service.remove("a1", "u1").await.unwrap(), 0);

        assert_eq!(service.count("a1").await.unwrap(), 0);
        assert_eq!(article_likes_column(&pool, "a1").await, 0);
    }

    #[tokio::test]
    async fn remove_without_like_is_rejected() {
        let (pool, service) = setup().await;
        create_article(&pool, "a1").await;

        // Pre-existing counter value must survive the aborted transaction.
        sqlx::query("UPDATE articles SET likes = 5 WHERE id = 'a1'")
            .execute(&pool)
            .await
            .unwrap();

        let err = service.remove("a1", "u1").await.unwrap_err();
        assert!(matches!(err, LikeError::NotFound));
        assert_eq!(article_likes_column(&pool, "a1").await, 5);
        assert_eq!(service.count("a1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn sequential_adds_count_each_user_once() {
        let (pool, service) = setup().await;
        create_article(&pool, "a1").await;

        for (i, user) in ["u1", "u2", "u3", "u4"].iter().enumerate() {
            assert_eq!(service.add("a1", user).await.unwrap(), i as i64 + 1);
        }

        assert_eq!(service.count("a1").await.unwrap(), 4);
        assert_eq!(article_likes_column(&pool, "a1").await, 4);
    }

    #[tokio::test]
    async fn status_follows_committed_toggles() {
        let (pool, service) = setup().await;
        create_article(&pool, "a1").await;

        assert!(!service.status("a1", "u1").await.unwrap());
        service.add("a1", "u1").await.unwrap();
        assert!(service.status("a1", "u1").await.unwrap());
        service.remove("a1", "u1").await.unwrap();
        assert!(!service.status("a1", "u1").await.unwrap());
    }

    #[tokio::test]
    async fn counts_are_scoped_per_article() {
        let (pool, service) = setup().await;
        create_article(&pool, "a1").await;
        create_article(&pool, "a2").await;

        service.add("a1", "u1").await.unwrap();
        service.add("a2", "u1").await.unwrap();
        service.add("a2", "u2").await.unwrap();

        assert_eq!(service.count("a1").await.unwrap(), 1);
        assert_eq!(service.count("a2").await.unwrap(), 2);
        assert_eq!(article_likes_column(&pool, "a1").await, 1);
        assert_eq!(article_likes_column(&pool, "a2").await, 2);
    }

    #[tokio::test]
    async fn toggling_an_unknown_article_is_permitted() {
        let (_pool, service) = setup().await;

        // No article row exists; the counter update hits zero rows and the
        // toggle still succeeds.
        assert_eq!(service.add("ghost", "u1").await.unwrap(), 1);
        assert_eq!(service.count("ghost").await.unwrap(), 1);
    }
}
