use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// POST /api/users
///
/// The duplicate-email check gives a clean 409 for the common case; the
/// UNIQUE constraint on email is the real guarantee, since two racing
/// registrations can both pass the SELECT.
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.map_err(|_| AppError::InvalidBody)?;

    if req.email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now();

    let mut tx = state.pool.begin().await?;

    let existing: Option<String> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?1")
        .bind(&req.email)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Email already exists"));
    }

    sqlx::query(
        r#"
        INSERT INTO users (id, email, firstname, lastname, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&id)
    .bind(&req.email)
    .bind(&req.firstname)
    .bind(&req.lastname)
    .bind(created_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(User {
            id,
            email: req.email,
            firstname: req.firstname,
            lastname: req.lastname,
            created_at,
        }),
    ))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, firstname, lastname, created_at FROM users WHERE id = ?1",
    )
    .bind(&id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("User not found"))?;

    Ok(Json(user))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body.map_err(|_| AppError::InvalidBody)?;

    let result = sqlx::query("UPDATE users SET firstname = ?1, lastname = ?2 WHERE id = ?3")
        .bind(&req.firstname)
        .bind(&req.lastname)
        .bind(&id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found"));
    }

    Ok(Json(json!({"message": "User updated successfully"})))
}
