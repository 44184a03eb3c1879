//! Counter synchronizer: recomputes the aggregate like count for an article
//! and writes it onto the article row.

use sqlx::SqliteConnection;

use crate::store;

/// Re-count the like relations for `article_id` and persist the result in
/// the article's `likes` column, both on the caller's connection so the
/// read and the write share the in-flight transaction. Returns the count
/// that was written.
///
/// No existence check is made: updating an unknown article affects zero
/// rows and is not an error here.
pub async fn recompute_and_store(
    conn: &mut SqliteConnection,
    article_id: &str,
) -> Result<i64, sqlx::Error> {
    let count = store::count(&mut *conn, article_id).await?;

    sqlx::query("UPDATE articles SET likes = ?1 WHERE id = ?2")
        .bind(count)
        .bind(article_id)
        .execute(&mut *conn)
        .await?;

    Ok(count)
}
