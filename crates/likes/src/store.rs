//! Like relation store: the only writer of the `likes` table.
//!
//! Every function is generic over the executor so the same queries run
//! against the pool for plain reads and against an open transaction when a
//! toggle is in flight.

use chrono::Utc;
use sqlx::{Executor, Sqlite};

/// True iff a like relation exists for the pair.
pub async fn exists<'e, E>(executor: E, article_id: &str, user_id: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM likes
            WHERE article_id = ?1 AND user_id = ?2
        )
        "#,
    )
    .bind(article_id)
    .bind(user_id)
    .fetch_one(executor)
    .await
}

/// Number of like relations for the article.
pub async fn count<'e, E>(executor: E, article_id: &str) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE article_id = ?1")
        .bind(article_id)
        .fetch_one(executor)
        .await
}

/// Idempotent upsert: a no-op when the pair already exists, so a second
/// like from the same user neither errors nor touches `created_at`.
pub async fn insert<'e, E>(executor: E, article_id: &str, user_id: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO likes (article_id, user_id, created_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (user_id, article_id) DO NOTHING
        "#,
    )
    .bind(article_id)
    .bind(user_id)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(())
}

/// Delete the relation if present. Returns the affected row count (0 or 1);
/// a missing pair is reported through the count, not as an error.
pub async fn delete<'e, E>(executor: E, article_id: &str, user_id: &str) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM likes WHERE article_id = ?1 AND user_id = ?2")
        .bind(article_id)
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
