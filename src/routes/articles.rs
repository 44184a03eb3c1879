use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::error::AppError;
use crate::routes::AppState;

/// Author profile joined onto articles and comments.
#[derive(Debug, Serialize)]
pub struct Author {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct Article {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct OwnerParams {
    #[serde(default)]
    pub user_id: String,
}

/// Columns shared by the article list and detail queries.
const ARTICLE_WITH_AUTHOR: &str = r#"
    SELECT a.id, a.user_id, a.content, a.likes, a.created_at,
           u.email AS author_email, u.firstname AS author_firstname,
           u.lastname AS author_lastname, u.created_at AS author_created_at
    FROM articles a
    LEFT JOIN users u ON a.user_id = u.id
"#;

fn article_from_row(row: &SqliteRow) -> Result<Article, sqlx::Error> {
    // LEFT JOIN: a missing author leaves every u.* column NULL.
    let author = match row.try_get::<Option<String>, _>("author_email")? {
        Some(email) => Some(Author {
            email,
            firstname: row.try_get("author_firstname")?,
            lastname: row.try_get("author_lastname")?,
            created_at: row.try_get("author_created_at")?,
        }),
        None => None,
    };

    Ok(Article {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        content: row.try_get("content")?,
        likes: row.try_get("likes")?,
        created_at: row.try_get("created_at")?,
        author,
    })
}

/// GET /api/articles - latest five articles with their authors.
pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<Article>>, AppError> {
    let rows = sqlx::query(&format!(
        "{ARTICLE_WITH_AUTHOR} ORDER BY a.created_at DESC LIMIT 5"
    ))
    .fetch_all(&state.pool)
    .await?;

    let articles = rows
        .iter()
        .map(article_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(articles))
}

/// GET /api/articles/{id}
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, AppError> {
    let row = sqlx::query(&format!("{ARTICLE_WITH_AUTHOR} WHERE a.id = ?1"))
        .bind(&id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound("Article not found"))?;

    Ok(Json(article_from_row(&row)?))
}

/// POST /api/articles - the aggregate like count starts at zero.
pub async fn create_article(
    State(state): State<AppState>,
    body: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.map_err(|_| AppError::InvalidBody)?;

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO articles (id, user_id, content, likes, created_at)
        VALUES (?1, ?2, ?3, 0, ?4)
        "#,
    )
    .bind(&id)
    .bind(&req.user_id)
    .bind(&req.content)
    .bind(created_at)
    .execute(&state.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(Article {
            id,
            user_id: req.user_id,
            content: req.content,
            likes: 0,
            created_at,
            author: None,
        }),
    ))
}

/// PUT /api/articles/{id} - ownership enforced by matching user_id in the
/// WHERE clause and checking the affected row count.
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateArticleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.map_err(|_| AppError::InvalidBody)?;

    let result = sqlx::query("UPDATE articles SET content = ?1 WHERE id = ?2 AND user_id = ?3")
        .bind(&req.content)
        .bind(&id)
        .bind(&req.user_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Article not found or unauthorized"));
    }

    Ok(Json(json!({"message": "Article updated successfully"})))
}

/// DELETE /api/articles/{id}?user_id=
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<OwnerParams>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM articles WHERE id = ?1 AND user_id = ?2")
        .bind(&id)
        .bind(&params.user_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Article not found or unauthorized"));
    }

    Ok(Json(json!({"message": "Article deleted successfully"})))
}
