use axum::{
    extract::{rejection::JsonRejection, Path, State},
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
use crate::routes::articles::{Article, Author};
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct Favorite {
    pub id: String,
    pub profile_id: String,
    pub article_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,
}

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub profile_id: String,
    #[serde(default)]
    pub article_id: String,
}

/// GET /api/favorites/user/{id} - favorites with the article and its
/// author joined in, newest first.
pub async fn list_user_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Favorite>>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT f.id, f.user_id, f.article_id, f.created_at,
               a.id AS article_pk, a.user_id AS article_user_id,
               a.content AS article_content, a.likes AS article_likes,
               a.created_at AS article_created_at,
               u.email AS author_email, u.firstname AS author_firstname,
               u.lastname AS author_lastname, u.created_at AS author_created_at
        FROM favorites f
        LEFT JOIN articles a ON f.article_id = a.id
        LEFT JOIN users u ON a.user_id = u.id
        WHERE f.user_id = ?1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(&user_id)
    .fetch_all(&state.pool)
    .await?;

    let favorites = rows
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

            // The favorited article may have been deleted since.
            let article = match row.try_get::<Option<String>, _>("article_pk")? {
                Some(id) => Some(Article {
                    id,
                    user_id: row.try_get("article_user_id")?,
                    content: row.try_get("article_content")?,
                    likes: row.try_get("article_likes")?,
                    created_at: row.try_get("article_created_at")?,
                    author,
                }),
                None => None,
            };

            Ok(Favorite {
                id: row.try_get("id")?,
                profile_id: row.try_get("user_id")?,
                article_id: row.try_get("article_id")?,
                created_at: row.try_get("created_at")?,
                article,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    Ok(Json(favorites))
}

/// POST /api/favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    body: Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.map_err(|_| AppError::InvalidBody)?;

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO favorites (id, user_id, article_id, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&id)
    .bind(&req.profile_id)
    .bind(&req.article_id)
    .bind(created_at)
    .execute(&state.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(Favorite {
            id,
            profile_id: req.profile_id,
            article_id: req.article_id,
            created_at,
            article: None,
        }),
    ))
}

/// DELETE /api/favorites/{id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM favorites WHERE id = ?1")
        .bind(&id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Favorite not found or unauthorized"));
    }

    Ok(Json(json!({"message": "Favorite removed successfully"})))
}
