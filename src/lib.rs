pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod routes;

pub use routes::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router over a connected pool.
///
/// Also the entry point for integration tests, which drive the router
/// directly with `tower::ServiceExt::oneshot` instead of binding a socket.
pub fn create_app(pool: SqlitePool) -> Router {
    use routes::*;

    let state = AppState::new(pool);

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Users
        .route("/api/users", post(create_user))
        .route("/api/users/{id}", get(get_user).put(update_user))
        // Articles
        .route("/api/articles", get(list_articles).post(create_article))
        .route(
            "/api/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
        // Comments
        .route("/api/comments/article/{id}", get(list_article_comments))
        .route("/api/comments", post(create_comment))
        .route(
            "/api/comments/{id}",
            axum::routing::put(update_comment).delete(delete_comment),
        )
        // Favorites
        .route("/api/favorites/user/{id}", get(list_user_favorites))
        .route("/api/favorites", post(add_favorite))
        .route("/api/favorites/{id}", axum::routing::delete(remove_favorite))
        // Followers
        .route("/api/followers/{user_id}", get(list_followers))
        .route("/api/followers/following/{user_id}", get(list_following))
        .route("/api/followers", post(follow).delete(unfollow))
        // Likes
        .route("/api/likes/status", get(get_like_status))
        .route("/api/likes/count/{id}", get(get_like_count))
        .route("/api/likes", post(add_like).delete(remove_like))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
