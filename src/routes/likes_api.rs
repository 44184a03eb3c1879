//! Like-toggle endpoints. Add and remove run through the transactional
//! [`likes::LikeService`]; status and count are read-only pass-throughs.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub article_id: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub article_id: String,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub liked: bool,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct LikesResponse {
    pub likes: i64,
}

/// GET /api/likes/status?article_id=&user_id=
pub async fn get_like_status(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<Json<StatusResponse>, AppError> {
    let liked = state.likes.status(&params.article_id, &params.user_id).await?;
    Ok(Json(StatusResponse { liked }))
}

/// GET /api/likes/count/{id}
pub async fn get_like_count(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.likes.count(&article_id).await?;
    Ok(Json(CountResponse { count }))
}

/// POST /api/likes - idempotent; returns the recomputed article count.
pub async fn add_like(
    State(state): State<AppState>,
    body: Result<Json<LikeRequest>, JsonRejection>,
) -> Result<Json<LikesResponse>, AppError> {
    let Json(req) = body.map_err(|_| AppError::InvalidBody)?;
    let count = state.likes.add(&req.article_id, &req.user_id).await?;
    Ok(Json(LikesResponse { likes: count }))
}

/// DELETE /api/likes - 404 when the pair was never liked.
pub async fn remove_like(
    State(state): State<AppState>,
    body: Result<Json<LikeRequest>, JsonRejection>,
) -> Result<Json<LikesResponse>, AppError> {
    let Json(req) = body.map_err(|_| AppError::InvalidBody)?;
    let count = state.likes.remove(&req.article_id, &req.user_id).await?;
    Ok(Json(LikesResponse { likes: count }))
}
