use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::Row;
use uuid::Uuid;

use crate::error::AppError;
use crate::routes::articles::{Author, OwnerParams};
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct Comment {
    pub id: String,
    pub article_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub article_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub content: String,
}

/// GET /api/comments/article/{id} - oldest first, with author profiles.
pub async fn list_article_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.article_id, c.user_id, c.content, c.created_at,
               u.email AS author_email, u.firstname AS author_firstname,
               u.lastname AS author_lastname, u.created_at AS author_created_at
        FROM comments c
        LEFT JOIN users u ON c.user_id = u.id
        WHERE c.article_id = ?1
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(&article_id)
    .fetch_all(&state.pool)
    .await?;

    let comments = rows
        .iter()
        .map(|row| {
            let author = match row.try_get::<Option<String>, _>("author_email")? {
                Some(email) => Some(Author {
                    email,
                    firstname: row.try_get("author_firstname")?,
                    lastname: row.try_get("author_lastname")?,
                    created_at: row.try_get("author_created_at")?,
                }),
                None => None,
            };

            Ok(Comment {
                id: row.try_get("id")?,
                article_id: row.try_get("article_id")?,
                user_id: row.try_get("user_id")?,
                content: row.try_get("content")?,
                created_at: row.try_get("created_at")?,
                author,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    Ok(Json(comments))
}

/// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    body: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.map_err(|_| AppError::InvalidBody)?;

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO comments (id, article_id, user_id, content, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&id)
    .bind(&req.article_id)
    .bind(&req.user_id)
    .bind(&req.content)
    .bind(created_at)
    .execute(&state.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(Comment {
            id,
            article_id: req.article_id,
            user_id: req.user_id,
            content: req.content,
            created_at,
            author: None,
        }),
    ))
}

/// PUT /api/comments/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateCommentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.map_err(|_| AppError::InvalidBody)?;

    let result = sqlx::query("UPDATE comments SET content = ?1 WHERE id = ?2 AND user_id = ?3")
        .bind(&req.content)
        .bind(&id)
        .bind(&req.user_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Comment not found or unauthorized"));
    }

    Ok(Json(json!({"message": "Comment updated successfully"})))
}

/// DELETE /api/comments/{id}?user_id=
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<OwnerParams>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?1 AND user_id = ?2")
        .bind(&id)
        .bind(&params.user_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Comment not found or unauthorized"));
    }

    Ok(Json(json!({"message": "Comment deleted successfully"})))
}
