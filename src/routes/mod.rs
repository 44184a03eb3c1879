use likes::LikeService;
use sqlx::SqlitePool;

pub mod articles;
pub mod comments;
pub mod favorites;
pub mod followers;
pub mod health;
pub mod likes_api;
pub mod users;

pub use articles::{create_article, delete_article, get_article, list_articles, update_article};
pub use comments::{create_comment, delete_comment, list_article_comments, update_comment};
pub use favorites::{add_favorite, list_user_favorites, remove_favorite};
pub use followers::{follow, list_followers, list_following, unfollow};
pub use health::{health, ready};
pub use likes_api::{add_like, get_like_count, get_like_status, remove_like};
pub use users::{create_user, get_user, update_user};

/// Shared handler state: the pool for plain CRUD plus the like service,
/// which owns its own clone of the pool for toggle transactions.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub likes: LikeService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let likes = LikeService::new(pool.clone());
        Self { pool, likes }
    }
}
