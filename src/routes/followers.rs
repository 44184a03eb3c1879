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
use crate::routes::articles::Author;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct Follow {
    pub id: String,
    pub follower_id: String,
    pub following_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower: Option<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<Author>,
}

#[derive(Debug, Deserialize)]
pub struct FollowRequest {
    #[serde(default)]
    pub follower_id: String,
    #[serde(default)]
    pub following_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UnfollowParams {
    #[serde(default)]
    pub follower_id: String,
    #[serde(default)]
    pub following_id: String,
}

fn profile_from_row(row: &SqliteRow) -> Result<Option<Author>, sqlx::Error> {
    Ok(match row.try_get::<Option<String>, _>("profile_email")? {
        Some(email) => Some(Author {
            email,
            firstname: row.try_get("profile_firstname")?,
            lastname: row.try_get("profile_lastname")?,
            created_at: row.try_get("profile_created_at")?,
        }),
        None => None,
    })
}

/// GET /api/followers/{userId} - who follows this user.
pub async fn list_followers(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Follow>>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT f.id, f.follower_id, f.following_id, f.created_at,
               u.email AS profile_email, u.firstname AS profile_firstname,
               u.lastname AS profile_lastname, u.created_at AS profile_created_at
        FROM followers f
        LEFT JOIN users u ON f.follower_id = u.id
        WHERE f.following_id = ?1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(&user_id)
    .fetch_all(&state.pool)
    .await?;

    let followers = rows
        .iter()
        .map(|row| {
            Ok(Follow {
                id: row.try_get("id")?,
                follower_id: row.try_get("follower_id")?,
                following_id: row.try_get("following_id")?,
                created_at: row.try_get("created_at")?,
                follower: profile_from_row(row)?,
                following: None,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    Ok(Json(followers))
}

/// GET /api/followers/following/{userId} - who this user follows.
pub async fn list_following(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Follow>>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT f.id, f.follower_id, f.following_id, f.created_at,
               u.email AS profile_email, u.firstname AS profile_firstname,
               u.lastname AS profile_lastname, u.created_at AS profile_created_at
        FROM followers f
        LEFT JOIN users u ON f.following_id = u.id
        WHERE f.follower_id = ?1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(&user_id)
    .fetch_all(&state.pool)
    .await?;

    let following = rows
        .iter()
        .map(|row| {
            Ok(Follow {
                id: row.try_get("id")?,
                follower_id: row.try_get("follower_id")?,
                following_id: row.try_get("following_id")?,
                created_at: row.try_get("created_at")?,
                follower: None,
                following: profile_from_row(row)?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    Ok(Json(following))
}

/// POST /api/followers
pub async fn follow(
    State(state): State<AppState>,
    body: Result<Json<FollowRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.map_err(|_| AppError::InvalidBody)?;

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO followers (id, follower_id, following_id, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&id)
    .bind(&req.follower_id)
    .bind(&req.following_id)
    .bind(created_at)
    .execute(&state.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(Follow {
            id,
            follower_id: req.follower_id,
            following_id: req.following_id,
            created_at,
            follower: None,
            following: None,
        }),
    ))
}

/// DELETE /api/followers?follower_id=&following_id=
pub async fn unfollow(
    State(state): State<AppState>,
    Query(params): Query<UnfollowParams>,
) -> Result<impl IntoResponse, AppError> {
    let result =
        sqlx::query("DELETE FROM followers WHERE follower_id = ?1 AND following_id = ?2")
            .bind(&params.follower_id)
            .bind(&params.following_id)
            .execute(&state.pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Follow relationship not found"));
    }

    Ok(Json(json!({"message": "Unfollowed successfully"})))
}
